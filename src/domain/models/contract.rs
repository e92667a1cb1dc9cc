use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::domain::{errors::ValidationError, value_objects::UpdatableValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    #[default]
    Pending,
    Ongoing,
    Completed,
    Late,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Ongoing => "ongoing",
            ContractStatus::Completed => "completed",
            ContractStatus::Late => "late",
            ContractStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a contract in this state reserves its vehicle
    pub fn reserves_vehicle(&self) -> bool {
        !matches!(self, ContractStatus::Cancelled)
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ContractStatus::Pending),
            "ongoing" => Ok(ContractStatus::Ongoing),
            "completed" => Ok(ContractStatus::Completed),
            "late" => Ok(ContractStatus::Late),
            "cancelled" => Ok(ContractStatus::Cancelled),
            _ => Err(ValidationError::InvalidField {
                field: "status".to_string(),
                value: s.to_string(),
                expected: "pending, ongoing, completed, late or cancelled".to_string(),
            }),
        }
    }
}

/// A rental contract binding a client to a vehicle over a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Contract {
    pub id: Option<Uuid>,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[builder(default)]
    pub status: ContractStatus,
}

impl Contract {
    /// Inclusive overlap with `[start, end]`
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

impl Entity for Contract {
    type Key = Uuid;

    const KIND: &'static str = "Contract";

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }

    fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<NewContract> for Contract {
    fn from(input: NewContract) -> Self {
        Contract {
            id: None,
            client_id: input.client_id,
            vehicle_id: input.vehicle_id,
            start_date: input.start_date,
            end_date: input.end_date,
            status: ContractStatus::Pending,
        }
    }
}

/// Partial update of a contract; the client and the vehicle are fixed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractUpdate {
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub start_date: UpdatableValue<NaiveDate>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub end_date: UpdatableValue<NaiveDate>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub status: UpdatableValue<ContractStatus>,
}

impl ContractUpdate {
    pub fn apply_to(self, existing: Contract) -> Contract {
        Contract {
            id: existing.id,
            client_id: existing.client_id,
            vehicle_id: existing.vehicle_id,
            start_date: self.start_date.resolve(existing.start_date),
            end_date: self.end_date.resolve(existing.end_date),
            status: self.status.resolve(existing.status),
        }
    }
}
