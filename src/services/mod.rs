mod clients_service;
mod contracts_service;
mod validated_service;
pub mod validation;
pub mod validators;
mod vehicles_service;

pub use clients_service::ClientsService;
pub use contracts_service::ContractsService;
pub use validated_service::ValidatedService;
pub use vehicles_service::VehiclesService;
