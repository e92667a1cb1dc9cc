use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{
        errors::{ServiceError, ServiceResult, ValidationError},
        models::{Client, Entity},
        value_objects::LicenseNumber,
    },
    ports::repositories::ClientStorageProvider,
    services::validation::{ensure_unique_owner, ValidatorStep},
};

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;
const ADDRESS_LENGTH: std::ops::RangeInclusive<usize> = 5..=255;

/// Rejects malformed license numbers before any storage lookup
pub struct ClientLicenseFormatStep;

#[async_trait]
impl ValidatorStep<Client> for ClientLicenseFormatStep {
    fn name(&self) -> &'static str {
        "client_license_format"
    }

    async fn check(&self, candidate: &Client) -> ServiceResult<()> {
        LicenseNumber::new(candidate.license_number.clone())?;
        Ok(())
    }
}

fn check_name(field: &str, value: &str) -> Result<(), ValidationError> {
    let well_formed = NAME_LENGTH.contains(&value.chars().count())
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-' || c == ' ');

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Last and first names: 2 to 100 ASCII letters, spaces or hyphens
pub struct ClientNameFormatStep;

#[async_trait]
impl ValidatorStep<Client> for ClientNameFormatStep {
    fn name(&self) -> &'static str {
        "client_name_format"
    }

    async fn check(&self, candidate: &Client) -> ServiceResult<()> {
        check_name("last name", &candidate.last_name)?;
        check_name("first name", &candidate.first_name)?;
        Ok(())
    }
}

/// The address must hold between 5 and 255 characters
pub struct ClientAddressStep;

#[async_trait]
impl ValidatorStep<Client> for ClientAddressStep {
    fn name(&self) -> &'static str {
        "client_address"
    }

    async fn check(&self, candidate: &Client) -> ServiceResult<()> {
        if !ADDRESS_LENGTH.contains(&candidate.address.chars().count()) {
            return Err(ValidationError::InvalidAddress(candidate.address.clone()).into());
        }
        Ok(())
    }
}

/// The license number identifies a client and is fixed once stored.
///
/// Fails with `NotFound` when the candidate's key matches no stored client,
/// so an update can never insert a record that skipped the create rules.
pub struct ClientLicenseUnchangedStep {
    storage: Arc<dyn ClientStorageProvider>,
}

impl ClientLicenseUnchangedStep {
    pub fn new(storage: Arc<dyn ClientStorageProvider>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ValidatorStep<Client> for ClientLicenseUnchangedStep {
    fn name(&self) -> &'static str {
        "client_license_unchanged"
    }

    async fn check(&self, candidate: &Client) -> ServiceResult<()> {
        let Some(id) = candidate.id() else {
            return Ok(());
        };

        let stored = self
            .storage
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(Client::KIND, id))?;

        if stored.license_number != candidate.license_number {
            return Err(ValidationError::ImmutableField {
                field: "license_number".to_string(),
                stored: stored.license_number,
                requested: candidate.license_number.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// One client per license number
pub struct ClientLicenseUniqueStep {
    storage: Arc<dyn ClientStorageProvider>,
}

impl ClientLicenseUniqueStep {
    pub fn new(storage: Arc<dyn ClientStorageProvider>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ValidatorStep<Client> for ClientLicenseUniqueStep {
    fn name(&self) -> &'static str {
        "client_license_unique"
    }

    async fn check(&self, candidate: &Client) -> ServiceResult<()> {
        let found = self
            .storage
            .find_by_license_number(&candidate.license_number)
            .await?;

        ensure_unique_owner(candidate, found, || {
            format!(
                "A client with license number '{}' already exists.",
                candidate.license_number
            )
        })
    }
}

/// One client per (last name, first name, date of birth)
pub struct ClientIdentityUniqueStep {
    storage: Arc<dyn ClientStorageProvider>,
}

impl ClientIdentityUniqueStep {
    pub fn new(storage: Arc<dyn ClientStorageProvider>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ValidatorStep<Client> for ClientIdentityUniqueStep {
    fn name(&self) -> &'static str {
        "client_identity_unique"
    }

    async fn check(&self, candidate: &Client) -> ServiceResult<()> {
        let found = self
            .storage
            .find_by_identity(
                &candidate.last_name,
                &candidate.first_name,
                candidate.date_of_birth,
            )
            .await?;

        ensure_unique_owner(candidate, found, || {
            format!(
                "A client with name '{} {}' and birth date '{}' already exists.",
                candidate.first_name, candidate.last_name, candidate.date_of_birth
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client(last_name: &str, first_name: &str, address: &str) -> Client {
        Client::builder()
            .last_name(last_name)
            .first_name(first_name)
            .date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
            .license_number("AB123CD")
            .address(address)
            .build()
    }

    #[tokio::test]
    async fn test_name_format() {
        let step = ClientNameFormatStep;

        assert!(step.check(&client("Dupont", "Jean", "12 rue de Paris")).await.is_ok());
        assert!(step.check(&client("Saint-Exupery", "Jean Marc", "12 rue de Paris")).await.is_ok());

        let err = step.check(&client("D", "Jean", "12 rue de Paris")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidName { ref field, .. }) if field == "last name"
        ));

        let err = step.check(&client("Dupont", "J3an", "12 rue de Paris")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidName { ref field, .. }) if field == "first name"
        ));

        let too_long = "a".repeat(101);
        assert!(step.check(&client(&too_long, "Jean", "12 rue de Paris")).await.is_err());
    }

    #[tokio::test]
    async fn test_address_length() {
        let step = ClientAddressStep;

        assert!(step.check(&client("Dupont", "Jean", "1 rue")).await.is_ok());
        assert!(step.check(&client("Dupont", "Jean", &"x".repeat(255))).await.is_ok());

        let err = step.check(&client("Dupont", "Jean", "rue")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidAddress(_))
        ));
        assert!(step.check(&client("Dupont", "Jean", &"x".repeat(256))).await.is_err());
    }
}
