use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    domain::{
        errors::ServiceResult,
        models::{NewVehicle, Vehicle, VehicleUpdate},
    },
    ports::repositories::VehicleStorageProvider,
    services::{
        validation::{ValidationPipeline, ValidatorStep},
        validators::VehiclePlateUniqueStep,
        ValidatedService,
    },
};

/// Fleet management
#[derive(Clone)]
pub struct VehiclesService {
    engine: ValidatedService<Vehicle, dyn VehicleStorageProvider>,
}

impl VehiclesService {
    pub fn new(storage: Arc<dyn VehicleStorageProvider>) -> Self {
        // Plates can be changed, so updates re-check them too.
        let plate_unique: Arc<dyn ValidatorStep<Vehicle>> =
            Arc::new(VehiclePlateUniqueStep::new(storage.clone()));

        let create = ValidationPipeline::builder()
            .shared_step(plate_unique.clone())
            .build();
        let update = ValidationPipeline::builder()
            .shared_step(plate_unique)
            .build();

        Self {
            engine: ValidatedService::new(storage, create, update),
        }
    }

    pub fn engine(&self) -> &ValidatedService<Vehicle, dyn VehicleStorageProvider> {
        &self.engine
    }

    pub async fn create(&self, input: NewVehicle) -> ServiceResult<Vehicle> {
        self.engine.create(Vehicle::from(input)).await
    }

    pub async fn update(&self, vehicle: Vehicle) -> ServiceResult<()> {
        self.engine.update(vehicle).await
    }

    #[instrument(skip(self, update))]
    pub async fn patch(&self, id: &Uuid, update: VehicleUpdate) -> ServiceResult<Vehicle> {
        let existing = self.engine.require(id).await?;
        let merged = update.apply_to(existing);
        self.engine.update(merged.clone()).await?;
        Ok(merged)
    }

    pub async fn get_one(&self, id: &Uuid) -> ServiceResult<Option<Vehicle>> {
        self.engine.get_one(id).await
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Vehicle>> {
        self.engine.get_all().await
    }

    pub async fn delete(&self, id: &Uuid) -> ServiceResult<()> {
        self.engine.delete(id).await
    }
}
