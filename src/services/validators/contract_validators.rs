use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{
        errors::{ServiceError, ServiceResult, ValidationError},
        models::{Contract, Entity},
    },
    ports::repositories::{ClientStorageProvider, ContractStorageProvider, VehicleStorageProvider},
    services::validation::ValidatorStep,
};

/// The end date may not precede the start date
pub struct ContractPeriodStep;

#[async_trait]
impl ValidatorStep<Contract> for ContractPeriodStep {
    fn name(&self) -> &'static str {
        "contract_period"
    }

    async fn check(&self, candidate: &Contract) -> ServiceResult<()> {
        if candidate.end_date < candidate.start_date {
            return Err(ValidationError::InvalidPeriod {
                start: candidate.start_date,
                end: candidate.end_date,
            }
            .into());
        }
        Ok(())
    }
}

/// The contract's client and vehicle must both be stored
pub struct ContractPartiesExistStep {
    clients: Arc<dyn ClientStorageProvider>,
    vehicles: Arc<dyn VehicleStorageProvider>,
}

impl ContractPartiesExistStep {
    pub fn new(
        clients: Arc<dyn ClientStorageProvider>,
        vehicles: Arc<dyn VehicleStorageProvider>,
    ) -> Self {
        Self { clients, vehicles }
    }
}

#[async_trait]
impl ValidatorStep<Contract> for ContractPartiesExistStep {
    fn name(&self) -> &'static str {
        "contract_parties_exist"
    }

    async fn check(&self, candidate: &Contract) -> ServiceResult<()> {
        if !self.clients.exists(&candidate.client_id).await? {
            return Err(ValidationError::UnknownClient(candidate.client_id.to_string()).into());
        }
        if !self.vehicles.exists(&candidate.vehicle_id).await? {
            return Err(ValidationError::UnknownVehicle(candidate.vehicle_id.to_string()).into());
        }
        Ok(())
    }
}

/// The client and the vehicle of a stored contract are fixed.
///
/// Fails with `NotFound` when the candidate's key matches no stored contract.
pub struct ContractPartiesUnchangedStep {
    contracts: Arc<dyn ContractStorageProvider>,
}

impl ContractPartiesUnchangedStep {
    pub fn new(contracts: Arc<dyn ContractStorageProvider>) -> Self {
        Self { contracts }
    }
}

#[async_trait]
impl ValidatorStep<Contract> for ContractPartiesUnchangedStep {
    fn name(&self) -> &'static str {
        "contract_parties_unchanged"
    }

    async fn check(&self, candidate: &Contract) -> ServiceResult<()> {
        let Some(id) = candidate.id() else {
            return Ok(());
        };

        let stored = self
            .contracts
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(Contract::KIND, id))?;

        if stored.client_id != candidate.client_id {
            return Err(ValidationError::ImmutableField {
                field: "client_id".to_string(),
                stored: stored.client_id.to_string(),
                requested: candidate.client_id.to_string(),
            }
            .into());
        }
        if stored.vehicle_id != candidate.vehicle_id {
            return Err(ValidationError::ImmutableField {
                field: "vehicle_id".to_string(),
                stored: stored.vehicle_id.to_string(),
                requested: candidate.vehicle_id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// A vehicle cannot be booked by two overlapping contracts.
///
/// Cancelled contracts reserve nothing, on either side of the comparison.
pub struct VehicleAvailabilityStep {
    contracts: Arc<dyn ContractStorageProvider>,
}

impl VehicleAvailabilityStep {
    pub fn new(contracts: Arc<dyn ContractStorageProvider>) -> Self {
        Self { contracts }
    }
}

#[async_trait]
impl ValidatorStep<Contract> for VehicleAvailabilityStep {
    fn name(&self) -> &'static str {
        "vehicle_availability"
    }

    async fn check(&self, candidate: &Contract) -> ServiceResult<()> {
        if !candidate.status.reserves_vehicle() {
            return Ok(());
        }

        let overlapping = self
            .contracts
            .find_by_vehicle_between(
                &candidate.vehicle_id,
                candidate.start_date,
                candidate.end_date,
            )
            .await?;

        let blocking = overlapping
            .into_iter()
            .find(|other| other.status.reserves_vehicle() && !other.same_identity(candidate));

        match blocking {
            Some(other) => Err(ServiceError::conflict(format!(
                "Vehicle '{}' is already booked from {} to {}.",
                candidate.vehicle_id, other.start_date, other.end_date
            ))),
            None => Ok(()),
        }
    }
}
