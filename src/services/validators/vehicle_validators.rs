use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{errors::ServiceResult, models::Vehicle},
    ports::repositories::VehicleStorageProvider,
    services::validation::{ensure_unique_owner, ValidatorStep},
};

/// One vehicle per license plate
pub struct VehiclePlateUniqueStep {
    storage: Arc<dyn VehicleStorageProvider>,
}

impl VehiclePlateUniqueStep {
    pub fn new(storage: Arc<dyn VehicleStorageProvider>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ValidatorStep<Vehicle> for VehiclePlateUniqueStep {
    fn name(&self) -> &'static str {
        "vehicle_plate_unique"
    }

    async fn check(&self, candidate: &Vehicle) -> ServiceResult<()> {
        let found = self
            .storage
            .find_by_license_plate(&candidate.license_plate)
            .await?;

        ensure_unique_owner(candidate, found, || {
            format!(
                "A vehicle with license plate '{}' already exists.",
                candidate.license_plate
            )
        })
    }
}
