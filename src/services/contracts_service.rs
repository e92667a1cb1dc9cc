use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    domain::{
        errors::ServiceResult,
        models::{Contract, ContractUpdate, NewContract},
    },
    ports::repositories::{ClientStorageProvider, ContractStorageProvider, VehicleStorageProvider},
    services::{
        validation::ValidationPipeline,
        validators::{
            ContractPartiesExistStep, ContractPartiesUnchangedStep, ContractPeriodStep,
            VehicleAvailabilityStep,
        },
        ValidatedService,
    },
};

/// Rental contract management
#[derive(Clone)]
pub struct ContractsService {
    engine: ValidatedService<Contract, dyn ContractStorageProvider>,
}

impl ContractsService {
    pub fn new(
        contracts: Arc<dyn ContractStorageProvider>,
        clients: Arc<dyn ClientStorageProvider>,
        vehicles: Arc<dyn VehicleStorageProvider>,
    ) -> Self {
        let create = ValidationPipeline::builder()
            .step(ContractPeriodStep)
            .step(ContractPartiesExistStep::new(clients, vehicles))
            .step(VehicleAvailabilityStep::new(contracts.clone()))
            .build();

        // Parties are fixed once the contract exists
        let update = ValidationPipeline::builder()
            .step(ContractPartiesUnchangedStep::new(contracts.clone()))
            .step(ContractPeriodStep)
            .step(VehicleAvailabilityStep::new(contracts.clone()))
            .build();

        Self {
            engine: ValidatedService::new(contracts, create, update),
        }
    }

    pub fn engine(&self) -> &ValidatedService<Contract, dyn ContractStorageProvider> {
        &self.engine
    }

    pub async fn create(&self, input: NewContract) -> ServiceResult<Contract> {
        self.engine.create(Contract::from(input)).await
    }

    pub async fn update(&self, contract: Contract) -> ServiceResult<()> {
        self.engine.update(contract).await
    }

    #[instrument(skip(self, update))]
    pub async fn patch(&self, id: &Uuid, update: ContractUpdate) -> ServiceResult<Contract> {
        let existing = self.engine.require(id).await?;
        let merged = update.apply_to(existing);
        self.engine.update(merged.clone()).await?;
        Ok(merged)
    }

    pub async fn get_one(&self, id: &Uuid) -> ServiceResult<Option<Contract>> {
        self.engine.get_one(id).await
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Contract>> {
        self.engine.get_all().await
    }

    pub async fn get_by_client(&self, client_id: &Uuid) -> ServiceResult<Vec<Contract>> {
        self.engine.storage().find_by_client(client_id).await
    }

    pub async fn get_by_vehicle(&self, vehicle_id: &Uuid) -> ServiceResult<Vec<Contract>> {
        self.engine.storage().find_by_vehicle(vehicle_id).await
    }

    pub async fn get_by_vehicle_between(
        &self,
        vehicle_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Contract>> {
        self.engine
            .storage()
            .find_by_vehicle_between(vehicle_id, start, end)
            .await
    }

    pub async fn delete(&self, id: &Uuid) -> ServiceResult<()> {
        self.engine.delete(id).await
    }
}
