use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field of a partial-update payload.
///
/// `Unset` means the field was absent from the payload and the stored value
/// must be kept. `SetTo` carries the new value, which may itself be an
/// explicit clear when `T` is an `Option`.
///
/// Deserializes as the inner value. Pair it with `#[serde(default)]` so that a
/// missing field becomes `Unset`:
///
/// ```
/// use rental_backend::UpdatableValue;
/// use serde::Deserialize;
///
/// #[derive(Default, Deserialize)]
/// #[serde(default)]
/// struct Patch {
///     color: UpdatableValue<Option<String>>,
///     brand: UpdatableValue<String>,
/// }
///
/// let patch: Patch = serde_json::from_str(r#"{ "color": null }"#).unwrap();
/// assert_eq!(patch.color, UpdatableValue::of(None));
/// assert!(patch.brand.is_unset());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatableValue<T> {
    Unset,
    SetTo(T),
}

impl<T> UpdatableValue<T> {
    pub fn empty() -> Self {
        UpdatableValue::Unset
    }

    pub fn of(value: T) -> Self {
        UpdatableValue::SetTo(value)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, UpdatableValue::SetTo(_))
    }

    pub fn is_unset(&self) -> bool {
        !self.is_set()
    }

    /// Merge onto `existing`: keep it when unset, replace it otherwise
    pub fn resolve(self, existing: T) -> T {
        match self {
            UpdatableValue::Unset => existing,
            UpdatableValue::SetTo(value) => value,
        }
    }

    /// Merge a value that still has to be converted, e.g. a date sent as text.
    ///
    /// `convert` only runs for `SetTo`; an unset field returns `existing`
    /// untouched without going through any conversion.
    pub fn try_resolve_with<U, E, F>(self, existing: U, convert: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            UpdatableValue::Unset => Ok(existing),
            UpdatableValue::SetTo(value) => convert(value),
        }
    }

    pub fn as_ref(&self) -> UpdatableValue<&T> {
        match self {
            UpdatableValue::Unset => UpdatableValue::Unset,
            UpdatableValue::SetTo(value) => UpdatableValue::SetTo(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> UpdatableValue<U> {
        match self {
            UpdatableValue::Unset => UpdatableValue::Unset,
            UpdatableValue::SetTo(value) => UpdatableValue::SetTo(f(value)),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            UpdatableValue::Unset => None,
            UpdatableValue::SetTo(value) => Some(value),
        }
    }
}

impl<T> Default for UpdatableValue<T> {
    fn default() -> Self {
        UpdatableValue::Unset
    }
}

impl<'de, T> Deserialize<'de> for UpdatableValue<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(UpdatableValue::SetTo)
    }
}

impl<T> Serialize for UpdatableValue<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            UpdatableValue::SetTo(value) => value.serialize(serializer),
            UpdatableValue::Unset => serializer.serialize_none(),
        }
    }
}
