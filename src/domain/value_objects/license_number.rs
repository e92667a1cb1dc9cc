use crate::domain::errors::ValidationError;

/// A driving license number: two letters, three digits, two letters (`AB123CD`).
///
/// Letters are stored uppercase, so `ab123cd` and `AB123CD` are the same license.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LicenseNumber(String);

impl LicenseNumber {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() != 7 {
            return Err(ValidationError::InvalidLicenseNumber(value));
        }

        let well_formed = chars[..2].iter().all(|c| c.is_ascii_alphabetic())
            && chars[2..5].iter().all(|c| c.is_ascii_digit())
            && chars[5..].iter().all(|c| c.is_ascii_alphabetic());

        if !well_formed {
            return Err(ValidationError::InvalidLicenseNumber(value));
        }

        Ok(Self(value.to_ascii_uppercase()))
    }

    /// Uppercase form used for storage and lookups
    pub fn normalize(value: &str) -> String {
        value.trim().to_ascii_uppercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
