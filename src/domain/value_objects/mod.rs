mod license_number;
mod updatable_value;

pub use license_number::LicenseNumber;
pub use updatable_value::UpdatableValue;
