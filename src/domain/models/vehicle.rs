use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::domain::{errors::ValidationError, value_objects::UpdatableValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(VehicleStatus::Available),
            "rented" => Ok(VehicleStatus::Rented),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            _ => Err(ValidationError::InvalidField {
                field: "status".to_string(),
                value: s.to_string(),
                expected: "available, rented or maintenance".to_string(),
            }),
        }
    }
}

/// A vehicle of the rental fleet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct Vehicle {
    pub id: Option<Uuid>,
    pub brand: String,
    pub model: String,
    /// Business-unique
    pub license_plate: String,
    pub color: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    #[builder(default)]
    pub status: VehicleStatus,
}

impl Entity for Vehicle {
    type Key = Uuid;

    const KIND: &'static str = "Vehicle";

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }

    fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
}

impl From<NewVehicle> for Vehicle {
    fn from(input: NewVehicle) -> Self {
        Vehicle {
            id: None,
            brand: input.brand,
            model: input.model,
            license_plate: input.license_plate,
            color: input.color,
            acquisition_date: input.acquisition_date,
            status: VehicleStatus::Available,
        }
    }
}

/// Partial update of a vehicle; `color` and `acquisition_date` can be cleared
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub brand: UpdatableValue<String>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub model: UpdatableValue<String>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub license_plate: UpdatableValue<String>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub color: UpdatableValue<Option<String>>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub acquisition_date: UpdatableValue<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub status: UpdatableValue<VehicleStatus>,
}

impl VehicleUpdate {
    pub fn apply_to(self, existing: Vehicle) -> Vehicle {
        Vehicle {
            id: existing.id,
            brand: self.brand.resolve(existing.brand),
            model: self.model.resolve(existing.model),
            license_plate: self.license_plate.resolve(existing.license_plate),
            color: self.color.resolve(existing.color),
            acquisition_date: self.acquisition_date.resolve(existing.acquisition_date),
            status: self.status.resolve(existing.status),
        }
    }
}
