use std::fmt::Display;
use std::hash::Hash;

/// A persisted domain record identified by an immutable key.
///
/// The key is `None` until the first save; storage adapters assign it on
/// insert and it never changes afterwards.
pub trait Entity: Clone + Send + Sync + 'static {
    type Key: Clone + Eq + Hash + Display + Send + Sync + 'static;

    /// Human-readable entity name used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> Option<&Self::Key>;

    fn with_id(self, id: Self::Key) -> Self;

    /// True when `other` is the same stored record as `self`
    fn same_identity(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
