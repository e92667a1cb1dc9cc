use async_trait::async_trait;

use crate::domain::{
    errors::{ServiceError, ServiceResult},
    models::Entity,
};

/// One business rule checked against a candidate before it is persisted.
///
/// Steps are built once when services are wired and reused for every call.
/// They may query storage but must never modify the candidate.
#[async_trait]
pub trait ValidatorStep<E>: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn check(&self, candidate: &E) -> ServiceResult<()>;
}

/// Fail with a conflict when a unique key lookup found a *different* record.
///
/// Finding the candidate itself is fine: an update that leaves its own
/// unique key unchanged must go through.
pub fn ensure_unique_owner<E, F>(candidate: &E, found: Option<E>, describe: F) -> ServiceResult<()>
where
    E: Entity,
    F: FnOnce() -> String,
{
    match found {
        Some(existing) if !existing.same_identity(candidate) => {
            Err(ServiceError::conflict(describe()))
        }
        _ => Ok(()),
    }
}

/// A step backed by a plain synchronous function
pub struct FnStep<F> {
    name: &'static str,
    check: F,
}

impl<F> FnStep<F> {
    pub fn new(name: &'static str, check: F) -> Self {
        Self { name, check }
    }
}

#[async_trait]
impl<E, F> ValidatorStep<E> for FnStep<F>
where
    E: Send + Sync,
    F: Fn(&E) -> ServiceResult<()> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self, candidate: &E) -> ServiceResult<()> {
        (self.check)(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Vehicle;
    use uuid::Uuid;

    fn vehicle(id: Option<Uuid>) -> Vehicle {
        Vehicle::builder()
            .maybe_id(id)
            .brand("Renault")
            .model("Clio")
            .license_plate("AB-123-CD")
            .build()
    }

    #[test]
    fn test_no_match_passes() {
        let candidate = vehicle(None);
        assert!(ensure_unique_owner(&candidate, None, || "taken".to_string()).is_ok());
    }

    #[test]
    fn test_self_match_passes() {
        let id = Uuid::new_v4();
        let candidate = vehicle(Some(id));
        let found = vehicle(Some(id));
        assert!(ensure_unique_owner(&candidate, Some(found), || "taken".to_string()).is_ok());
    }

    #[test]
    fn test_other_owner_conflicts() {
        let candidate = vehicle(Some(Uuid::new_v4()));
        let found = vehicle(Some(Uuid::new_v4()));
        let err = ensure_unique_owner(&candidate, Some(found), || "taken".to_string()).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "Conflict: taken");
    }

    #[test]
    fn test_unsaved_candidate_conflicts_with_any_match() {
        let candidate = vehicle(None);
        let found = vehicle(Some(Uuid::new_v4()));
        assert!(ensure_unique_owner(&candidate, Some(found), || "taken".to_string()).is_err());
    }
}
