mod in_memory_repository;
mod sql_client_repository;
mod sql_contract_repository;
mod sql_support;
mod sql_vehicle_repository;

pub use in_memory_repository::{
    InMemoryClientRepository, InMemoryContractRepository, InMemoryRepository,
    InMemoryVehicleRepository,
};
pub use sql_client_repository::SqlClientRepository;
pub use sql_contract_repository::SqlContractRepository;
pub use sql_vehicle_repository::SqlVehicleRepository;
