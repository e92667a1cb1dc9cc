use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        errors::ServiceResult,
        models::{Client, Contract, Entity, Vehicle},
    },
    ports::repositories::{
        ClientStorageProvider, ContractStorageProvider, StorageProvider, VehicleStorageProvider,
    },
};

/// In-memory storage for one entity type, for tests and development.
///
/// It enforces no unique constraint of its own; uniqueness relies entirely on
/// the validation pipelines.
pub struct InMemoryRepository<E> {
    data: Arc<RwLock<HashMap<Uuid, E>>>,
}

pub type InMemoryClientRepository = InMemoryRepository<Client>;
pub type InMemoryVehicleRepository = InMemoryRepository<Vehicle>;
pub type InMemoryContractRepository = InMemoryRepository<Contract>;

impl<E> InMemoryRepository<E>
where
    E: Entity<Key = Uuid>,
{
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn find_first<P>(&self, predicate: P) -> Option<E>
    where
        P: Fn(&E) -> bool,
    {
        let data = self.data.read().await;
        data.values().find(|e| predicate(e)).cloned()
    }

    async fn filter<P>(&self, predicate: P) -> Vec<E>
    where
        P: Fn(&E) -> bool,
    {
        let data = self.data.read().await;
        data.values().filter(|e| predicate(e)).cloned().collect()
    }
}

impl<E> Default for InMemoryRepository<E>
where
    E: Entity<Key = Uuid>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

#[async_trait]
impl<E> StorageProvider<Uuid, E> for InMemoryRepository<E>
where
    E: Entity<Key = Uuid>,
{
    async fn exists(&self, key: &Uuid) -> ServiceResult<bool> {
        Ok(self.data.read().await.contains_key(key))
    }

    async fn get_all(&self) -> ServiceResult<Vec<E>> {
        Ok(self.data.read().await.values().cloned().collect())
    }

    async fn get(&self, key: &Uuid) -> ServiceResult<Option<E>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn save(&self, entity: E) -> ServiceResult<E> {
        let id = entity.id().copied().unwrap_or_else(Uuid::new_v4);
        let entity = entity.with_id(id);

        self.data.write().await.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &Uuid) -> ServiceResult<()> {
        self.data.write().await.remove(key);
        Ok(())
    }
}

#[async_trait]
impl ClientStorageProvider for InMemoryRepository<Client> {
    async fn find_by_license_number(&self, license_number: &str) -> ServiceResult<Option<Client>> {
        Ok(self
            .find_first(|c| c.license_number == license_number)
            .await)
    }

    async fn find_by_identity(
        &self,
        last_name: &str,
        first_name: &str,
        date_of_birth: NaiveDate,
    ) -> ServiceResult<Option<Client>> {
        Ok(self
            .find_first(|c| {
                c.last_name == last_name
                    && c.first_name == first_name
                    && c.date_of_birth == date_of_birth
            })
            .await)
    }
}

#[async_trait]
impl VehicleStorageProvider for InMemoryRepository<Vehicle> {
    async fn find_by_license_plate(&self, license_plate: &str) -> ServiceResult<Option<Vehicle>> {
        Ok(self.find_first(|v| v.license_plate == license_plate).await)
    }
}

#[async_trait]
impl ContractStorageProvider for InMemoryRepository<Contract> {
    async fn find_by_client(&self, client_id: &Uuid) -> ServiceResult<Vec<Contract>> {
        let mut contracts = self.filter(|c| &c.client_id == client_id).await;
        contracts.sort_by_key(|c| c.start_date);
        Ok(contracts)
    }

    async fn find_by_vehicle(&self, vehicle_id: &Uuid) -> ServiceResult<Vec<Contract>> {
        let mut contracts = self.filter(|c| &c.vehicle_id == vehicle_id).await;
        contracts.sort_by_key(|c| c.start_date);
        Ok(contracts)
    }

    async fn find_by_vehicle_between(
        &self,
        vehicle_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Contract>> {
        let mut contracts = self
            .filter(|c| &c.vehicle_id == vehicle_id && c.overlaps(start, end))
            .await;
        contracts.sort_by_key(|c| c.start_date);
        Ok(contracts)
    }
}
