use async_trait::async_trait;
use uuid::Uuid;

use super::StorageProvider;
use crate::domain::{errors::ServiceResult, models::Vehicle};

#[async_trait]
pub trait VehicleStorageProvider: StorageProvider<Uuid, Vehicle> {
    async fn find_by_license_plate(&self, license_plate: &str) -> ServiceResult<Option<Vehicle>>;
}
