pub mod repositories;

// Re-export all port traits for convenience
pub use repositories::{
    ClientStorageProvider, ContractStorageProvider, StorageProvider, VehicleStorageProvider,
};
