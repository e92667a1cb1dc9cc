mod client_storage_provider;
mod contract_storage_provider;
mod storage_provider;
mod vehicle_storage_provider;

pub use client_storage_provider::ClientStorageProvider;
pub use contract_storage_provider::ContractStorageProvider;
pub use storage_provider::StorageProvider;
pub use vehicle_storage_provider::VehicleStorageProvider;
