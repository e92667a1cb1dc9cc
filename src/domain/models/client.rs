use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::domain::{
    errors::ValidationError,
    value_objects::{LicenseNumber, UpdatableValue},
};

/// A rental customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct Client {
    pub id: Option<Uuid>,
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: NaiveDate,
    /// Business-unique, never changed by an update
    pub license_number: String,
    pub address: String,
}

impl Entity for Client {
    type Key = Uuid;

    const KIND: &'static str = "Client";

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }

    fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

/// Input record for creating a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: NaiveDate,
    pub license_number: String,
    pub address: String,
}

impl From<NewClient> for Client {
    fn from(input: NewClient) -> Self {
        Client {
            id: None,
            last_name: input.last_name,
            first_name: input.first_name,
            date_of_birth: input.date_of_birth,
            license_number: LicenseNumber::normalize(&input.license_number),
            address: input.address,
        }
    }
}

/// Partial update of a client.
///
/// The license number is deliberately absent: it identifies the client and
/// cannot be changed. The date of birth travels as text and is only parsed
/// when the field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub last_name: UpdatableValue<String>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub first_name: UpdatableValue<String>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub date_of_birth: UpdatableValue<String>,
    #[serde(skip_serializing_if = "UpdatableValue::is_unset")]
    pub address: UpdatableValue<String>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.last_name.is_unset()
            && self.first_name.is_unset()
            && self.date_of_birth.is_unset()
            && self.address.is_unset()
    }

    /// Merge this update onto a previously loaded client
    pub fn apply_to(self, existing: Client) -> Result<Client, ValidationError> {
        let date_of_birth = self
            .date_of_birth
            .try_resolve_with(existing.date_of_birth, |raw| {
                parse_date("date_of_birth", &raw)
            })?;

        Ok(Client {
            id: existing.id,
            last_name: self.last_name.resolve(existing.last_name),
            first_name: self.first_name.resolve(existing.first_name),
            date_of_birth,
            license_number: existing.license_number,
            address: self.address.resolve(existing.address),
        })
    }
}

pub(crate) fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Client {
        Client::builder()
            .id(Uuid::new_v4())
            .last_name("Dupont")
            .first_name("Jean")
            .date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
            .license_number("AB123CD")
            .address("12 rue de Paris")
            .build()
    }

    #[test]
    fn test_empty_update_is_a_no_op() {
        let client = existing();
        let update = ClientUpdate::default();
        assert!(update.is_empty());

        let merged = update.apply_to(client.clone()).unwrap();
        assert_eq!(merged, client);
    }

    #[test]
    fn test_single_field_update() {
        let client = existing();
        let update = ClientUpdate {
            last_name: UpdatableValue::of("Martin".to_string()),
            ..Default::default()
        };

        let merged = update.apply_to(client.clone()).unwrap();
        assert_eq!(merged.last_name, "Martin");
        assert_eq!(merged.first_name, client.first_name);
        assert_eq!(merged.date_of_birth, client.date_of_birth);
        assert_eq!(merged.license_number, client.license_number);
        assert_eq!(merged.address, client.address);
        assert_eq!(merged.id, client.id);
    }

    #[test]
    fn test_date_of_birth_is_parsed_when_set() {
        let update = ClientUpdate {
            date_of_birth: UpdatableValue::of("1985-06-15".to_string()),
            ..Default::default()
        };

        let merged = update.apply_to(existing()).unwrap();
        assert_eq!(
            merged.date_of_birth,
            NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_malformed_date_of_birth_is_rejected() {
        let update = ClientUpdate {
            date_of_birth: UpdatableValue::of("15/06/1985".to_string()),
            ..Default::default()
        };

        let err = update.apply_to(existing()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn test_update_from_json_payload() {
        let update: ClientUpdate = serde_json::from_str(r#"{ "last_name": "Martin" }"#).unwrap();
        assert_eq!(update.last_name, UpdatableValue::of("Martin".to_string()));
        assert!(update.first_name.is_unset());
        assert!(update.date_of_birth.is_unset());
        assert!(update.address.is_unset());
    }

    #[test]
    fn test_new_client_license_is_uppercased() {
        let client = Client::from(NewClient {
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            license_number: "ab123cd".to_string(),
            address: "12 rue de Paris".to_string(),
        });

        assert_eq!(client.license_number, "AB123CD");
        assert_eq!(client.id, None);
    }
}
