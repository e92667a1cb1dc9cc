use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    domain::{
        errors::{ServiceError, ServiceResult, ValidationError},
        models::Entity,
    },
    ports::repositories::StorageProvider,
    services::validation::ValidationPipeline,
};

/// Runs a validation pipeline in front of every mutation of one entity type.
///
/// A mutation is either rejected by the pipeline, in which case storage is
/// never touched, or fully validated and then handed to `save`. Reads and
/// deletes go straight to storage.
///
/// Uniqueness is checked without holding any lock until the save, so two
/// concurrent creates with the same key can both pass validation. Only a
/// storage-level unique constraint closes that gap (the SQL adapters declare
/// one; the in-memory adapters do not).
pub struct ValidatedService<E, S>
where
    E: Entity,
    S: StorageProvider<E::Key, E> + ?Sized,
{
    storage: Arc<S>,
    create_pipeline: ValidationPipeline<E>,
    update_pipeline: ValidationPipeline<E>,
}

impl<E, S> ValidatedService<E, S>
where
    E: Entity,
    S: StorageProvider<E::Key, E> + ?Sized,
{
    pub fn new(
        storage: Arc<S>,
        create_pipeline: ValidationPipeline<E>,
        update_pipeline: ValidationPipeline<E>,
    ) -> Self {
        Self {
            storage,
            create_pipeline,
            update_pipeline,
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn create_pipeline(&self) -> &ValidationPipeline<E> {
        &self.create_pipeline
    }

    pub fn update_pipeline(&self) -> &ValidationPipeline<E> {
        &self.update_pipeline
    }

    /// Validate a new record and persist it, returning it with its assigned key
    #[instrument(skip_all, fields(entity = E::KIND))]
    pub async fn create(&self, input: E) -> ServiceResult<E> {
        if let Err(err) = self.create_pipeline.run_all(&input).await {
            warn!(error = %err, "create rejected");
            return Err(err);
        }

        let saved = self.storage.save(input).await?;
        info!(id = %display_id(&saved), "created");
        Ok(saved)
    }

    /// Validate an already merged record and persist it.
    ///
    /// The caller loads the stored record and merges the partial update onto
    /// it first, so `candidate` must carry its key.
    #[instrument(skip_all, fields(entity = E::KIND))]
    pub async fn update(&self, candidate: E) -> ServiceResult<()> {
        if candidate.id().is_none() {
            return Err(ValidationError::InvalidField {
                field: "id".to_string(),
                value: String::new(),
                expected: format!("the key of a stored {}", E::KIND),
            }
            .into());
        }

        if let Err(err) = self.update_pipeline.run_all(&candidate).await {
            warn!(id = %display_id(&candidate), error = %err, "update rejected");
            return Err(err);
        }

        let saved = self.storage.save(candidate).await?;
        info!(id = %display_id(&saved), "updated");
        Ok(())
    }

    pub async fn get_one(&self, key: &E::Key) -> ServiceResult<Option<E>> {
        self.storage.get(key).await
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<E>> {
        self.storage.get_all().await
    }

    pub async fn exists(&self, key: &E::Key) -> ServiceResult<bool> {
        self.storage.exists(key).await
    }

    #[instrument(skip_all, fields(entity = E::KIND, id = %key))]
    pub async fn delete(&self, key: &E::Key) -> ServiceResult<()> {
        self.storage.delete(key).await?;
        debug!("deleted");
        Ok(())
    }

    /// Load `key`, or fail with `NotFound`
    pub async fn require(&self, key: &E::Key) -> ServiceResult<E> {
        self.get_one(key)
            .await?
            .ok_or_else(|| ServiceError::not_found(E::KIND, key))
    }
}

impl<E, S> Clone for ValidatedService<E, S>
where
    E: Entity,
    S: StorageProvider<E::Key, E> + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            create_pipeline: self.create_pipeline.clone(),
            update_pipeline: self.update_pipeline.clone(),
        }
    }
}

fn display_id<E: Entity>(entity: &E) -> String {
    entity
        .id()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<unassigned>".to_string())
}
