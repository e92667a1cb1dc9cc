use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::StorageProvider;
use crate::domain::{errors::ServiceResult, models::Client};

/// Client persistence, with lookups by each business-unique key
#[async_trait]
pub trait ClientStorageProvider: StorageProvider<Uuid, Client> {
    async fn find_by_license_number(&self, license_number: &str) -> ServiceResult<Option<Client>>;

    /// Lookup by the (last name, first name, date of birth) natural key
    async fn find_by_identity(
        &self,
        last_name: &str,
        first_name: &str,
        date_of_birth: NaiveDate,
    ) -> ServiceResult<Option<Client>>;
}
