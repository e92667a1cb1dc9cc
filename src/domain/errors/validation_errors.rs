use chrono::NaiveDate;

/// Business-rule violations that are not uniqueness conflicts
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Client rules
    InvalidLicenseNumber(String),
    InvalidName {
        field: String,
        value: String,
    },
    InvalidAddress(String),
    InvalidDate {
        field: String,
        value: String,
    },

    // Contract rules
    InvalidPeriod {
        start: NaiveDate,
        end: NaiveDate,
    },
    UnknownClient(String),
    UnknownVehicle(String),

    /// A field that identifies the record was changed by an update
    ImmutableField {
        field: String,
        stored: String,
        requested: String,
    },

    /// Catch-all for rules that only need a field and a reason
    InvalidField {
        field: String,
        value: String,
        expected: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidLicenseNumber(value) => {
                write!(
                    f,
                    "Invalid license number '{}': expected two letters, three digits, two letters",
                    value
                )
            }
            ValidationError::InvalidName { field, value } => {
                write!(
                    f,
                    "Invalid {} '{}': expected 2 to 100 letters, spaces or hyphens",
                    field, value
                )
            }
            ValidationError::InvalidAddress(value) => {
                write!(
                    f,
                    "Invalid address '{}': must be between 5 and 255 characters",
                    value
                )
            }
            ValidationError::InvalidDate { field, value } => {
                write!(
                    f,
                    "Invalid date for field '{}': '{}' (expected YYYY-MM-DD)",
                    field, value
                )
            }
            ValidationError::InvalidPeriod { start, end } => {
                write!(
                    f,
                    "Invalid contract period: end date {} is before start date {}",
                    end, start
                )
            }
            ValidationError::UnknownClient(id) => write!(f, "Client '{}' does not exist", id),
            ValidationError::UnknownVehicle(id) => write!(f, "Vehicle '{}' does not exist", id),
            ValidationError::ImmutableField {
                field,
                stored,
                requested,
            } => {
                write!(
                    f,
                    "Field '{}' cannot be changed (stored '{}', requested '{}')",
                    field, stored, requested
                )
            }
            ValidationError::InvalidField {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected: {})",
                    field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
