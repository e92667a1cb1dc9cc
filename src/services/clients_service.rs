use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    domain::{
        errors::ServiceResult,
        models::{Client, ClientUpdate, NewClient},
    },
    ports::repositories::ClientStorageProvider,
    services::{
        validation::ValidationPipeline,
        validators::{
            ClientAddressStep, ClientIdentityUniqueStep, ClientLicenseFormatStep,
            ClientLicenseUnchangedStep, ClientLicenseUniqueStep, ClientNameFormatStep,
        },
        ValidatedService,
    },
};

/// Client management: validated create/update plus plain reads and deletes
#[derive(Clone)]
pub struct ClientsService {
    engine: ValidatedService<Client, dyn ClientStorageProvider>,
}

impl ClientsService {
    pub fn new(storage: Arc<dyn ClientStorageProvider>) -> Self {
        let create = ValidationPipeline::builder()
            .step(ClientLicenseFormatStep)
            .step(ClientNameFormatStep)
            .step(ClientAddressStep)
            .step(ClientLicenseUniqueStep::new(storage.clone()))
            .step(ClientIdentityUniqueStep::new(storage.clone()))
            .build();

        // With the license pinned to its stored value, only the identity can
        // collide with another client.
        let update = ValidationPipeline::builder()
            .step(ClientLicenseUnchangedStep::new(storage.clone()))
            .step(ClientNameFormatStep)
            .step(ClientAddressStep)
            .step(ClientIdentityUniqueStep::new(storage.clone()))
            .build();

        Self {
            engine: ValidatedService::new(storage, create, update),
        }
    }

    pub fn engine(&self) -> &ValidatedService<Client, dyn ClientStorageProvider> {
        &self.engine
    }

    pub async fn create(&self, input: NewClient) -> ServiceResult<Client> {
        self.engine.create(Client::from(input)).await
    }

    /// Persist a client that was already merged with its update
    pub async fn update(&self, client: Client) -> ServiceResult<()> {
        self.engine.update(client).await
    }

    /// Load a client, merge `update` onto it, validate and save the result
    #[instrument(skip(self, update))]
    pub async fn patch(&self, id: &Uuid, update: ClientUpdate) -> ServiceResult<Client> {
        let existing = self.engine.require(id).await?;
        let merged = update.apply_to(existing)?;
        self.engine.update(merged.clone()).await?;
        Ok(merged)
    }

    pub async fn get_one(&self, id: &Uuid) -> ServiceResult<Option<Client>> {
        self.engine.get_one(id).await
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Client>> {
        self.engine.get_all().await
    }

    pub async fn delete(&self, id: &Uuid) -> ServiceResult<()> {
        self.engine.delete(id).await
    }
}
