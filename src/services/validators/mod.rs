mod client_validators;
mod contract_validators;
mod vehicle_validators;

pub use client_validators::{
    ClientAddressStep, ClientIdentityUniqueStep, ClientLicenseFormatStep,
    ClientLicenseUnchangedStep, ClientLicenseUniqueStep, ClientNameFormatStep,
};
pub use contract_validators::{
    ContractPartiesExistStep, ContractPartiesUnchangedStep, ContractPeriodStep,
    VehicleAvailabilityStep,
};
pub use vehicle_validators::VehiclePlateUniqueStep;
