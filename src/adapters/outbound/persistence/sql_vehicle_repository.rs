use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

use super::sql_support::{column, map_db_error, uuid_column};
use crate::{
    domain::{
        errors::{ServiceError, ServiceResult},
        models::{Vehicle, VehicleStatus},
    },
    ports::repositories::{StorageProvider, VehicleStorageProvider},
};

const SELECT_VEHICLE: &str = r#"
    SELECT id, brand, model, license_plate, color, acquisition_date, status
    FROM vehicles
"#;

/// SQL-based implementation of VehicleStorageProvider using SQLite
#[derive(Clone)]
pub struct SqlVehicleRepository {
    pool: SqlitePool,
}

impl SqlVehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id TEXT PRIMARY KEY NOT NULL,
                brand TEXT NOT NULL,
                model TEXT NOT NULL,
                license_plate TEXT NOT NULL UNIQUE,
                color TEXT,
                acquisition_date TEXT,
                status TEXT NOT NULL DEFAULT 'available'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn from_row(row: &SqliteRow) -> ServiceResult<Vehicle> {
        let status: String = column(row, "status")?;
        let status = status
            .parse::<VehicleStatus>()
            .map_err(|e| ServiceError::storage("Corrupt vehicle status", e))?;

        Ok(Vehicle {
            id: Some(uuid_column(row, "id")?),
            brand: column(row, "brand")?,
            model: column(row, "model")?,
            license_plate: column(row, "license_plate")?,
            color: column(row, "color")?,
            acquisition_date: column(row, "acquisition_date")?,
            status,
        })
    }
}

#[async_trait]
impl StorageProvider<Uuid, Vehicle> for SqlVehicleRepository {
    async fn exists(&self, key: &Uuid) -> ServiceResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE id = ?")
            .bind(key.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("checking vehicle existence", e))?;

        Ok(count > 0)
    }

    async fn get_all(&self) -> ServiceResult<Vec<Vehicle>> {
        let rows = sqlx::query(&format!("{} ORDER BY license_plate", SELECT_VEHICLE))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("listing vehicles", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn get(&self, key: &Uuid) -> ServiceResult<Option<Vehicle>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_VEHICLE))
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("retrieving vehicle", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, vehicle: Vehicle) -> ServiceResult<Vehicle> {
        let id = vehicle.id.unwrap_or_else(Uuid::new_v4);

        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, brand, model, license_plate, color, acquisition_date, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id)
            DO UPDATE SET
                brand = excluded.brand,
                model = excluded.model,
                license_plate = excluded.license_plate,
                color = excluded.color,
                acquisition_date = excluded.acquisition_date,
                status = excluded.status
            "#,
        )
        .bind(id.to_string())
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.color)
        .bind(vehicle.acquisition_date)
        .bind(vehicle.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("saving vehicle", e))?;

        Ok(Vehicle {
            id: Some(id),
            ..vehicle
        })
    }

    async fn delete(&self, key: &Uuid) -> ServiceResult<()> {
        sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("deleting vehicle", e))?;

        Ok(())
    }
}

#[async_trait]
impl VehicleStorageProvider for SqlVehicleRepository {
    async fn find_by_license_plate(&self, license_plate: &str) -> ServiceResult<Option<Vehicle>> {
        let row = sqlx::query(&format!("{} WHERE license_plate = ?", SELECT_VEHICLE))
            .bind(license_plate)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("finding vehicle by license plate", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }
}
