use sqlx::{sqlite::SqliteRow, Decode, Row, Sqlite, Type};
use uuid::Uuid;

use crate::domain::errors::{ServiceError, ServiceResult};

/// Map a sqlx error onto the service taxonomy.
///
/// Unique constraint violations become conflicts: they are the storage-level
/// backstop for races the validation pipelines cannot see.
pub(crate) fn map_db_error(context: &str, err: sqlx::Error) -> ServiceError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return ServiceError::conflict(format!(
                "Unique constraint violated while {}: {}",
                context,
                db_err.message()
            ));
        }
    }
    ServiceError::storage(format!("Database error while {}", context), err)
}

pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> ServiceResult<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| map_db_error(&format!("reading column '{}'", name), e))
}

pub(crate) fn uuid_column(row: &SqliteRow, name: &str) -> ServiceResult<Uuid> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw)
        .map_err(|e| ServiceError::storage(format!("Corrupt uuid in column '{}'", name), e))
}
