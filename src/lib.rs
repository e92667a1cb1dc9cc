pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - entities, update records and value objects
pub use domain::{
    Client, ClientUpdate, Contract, ContractStatus, ContractUpdate, Entity, LicenseNumber,
    NewClient, NewContract, NewVehicle, ServiceError, ServiceResult, UpdatableValue,
    ValidationError, Vehicle, VehicleStatus, VehicleUpdate,
};

// Port types - storage interfaces
pub use ports::{
    ClientStorageProvider, ContractStorageProvider, StorageProvider, VehicleStorageProvider,
};

// Services - validated mutations
pub use services::{
    validation::{ValidationPipeline, ValidatorStep},
    ClientsService, ContractsService, ValidatedService, VehiclesService,
};

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, create_sqlite_app, AppBuilder, AppConfig,
    AppDependencies, AppError, AppServices, RepositoryBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::persistence::{
    InMemoryClientRepository, InMemoryContractRepository, InMemoryRepository,
    InMemoryVehicleRepository, SqlClientRepository, SqlContractRepository, SqlVehicleRepository,
};

pub mod prelude {
    pub use crate::{
        create_in_memory_app, AppBuilder, AppServices, Client, ClientUpdate, Contract,
        ContractUpdate, NewClient, NewContract, NewVehicle, ServiceError, ServiceResult,
        UpdatableValue, Vehicle, VehicleUpdate,
    };
}
