use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::StorageProvider;
use crate::domain::{errors::ServiceResult, models::Contract};

#[async_trait]
pub trait ContractStorageProvider: StorageProvider<Uuid, Contract> {
    async fn find_by_client(&self, client_id: &Uuid) -> ServiceResult<Vec<Contract>>;

    async fn find_by_vehicle(&self, vehicle_id: &Uuid) -> ServiceResult<Vec<Contract>>;

    /// Contracts of `vehicle_id` whose period intersects `[start, end]`, bounds included
    async fn find_by_vehicle_between(
        &self,
        vehicle_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Contract>>;
}
