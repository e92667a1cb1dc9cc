use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

use super::sql_support::{column, map_db_error, uuid_column};
use crate::{
    domain::{
        errors::{ServiceError, ServiceResult},
        models::{Contract, ContractStatus},
    },
    ports::repositories::{ContractStorageProvider, StorageProvider},
};

const SELECT_CONTRACT: &str = r#"
    SELECT id, client_id, vehicle_id, start_date, end_date, status
    FROM contracts
"#;

/// SQL-based implementation of ContractStorageProvider using SQLite
#[derive(Clone)]
pub struct SqlContractRepository {
    pool: SqlitePool,
}

impl SqlContractRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contracts (
                id TEXT PRIMARY KEY NOT NULL,
                client_id TEXT NOT NULL,
                vehicle_id TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_contracts_client ON contracts(client_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_contracts_vehicle ON contracts(vehicle_id, start_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn from_row(row: &SqliteRow) -> ServiceResult<Contract> {
        let status: String = column(row, "status")?;
        let status = status
            .parse::<ContractStatus>()
            .map_err(|e| ServiceError::storage("Corrupt contract status", e))?;

        Ok(Contract {
            id: Some(uuid_column(row, "id")?),
            client_id: uuid_column(row, "client_id")?,
            vehicle_id: uuid_column(row, "vehicle_id")?,
            start_date: column(row, "start_date")?,
            end_date: column(row, "end_date")?,
            status,
        })
    }

    fn from_rows(rows: &[SqliteRow]) -> ServiceResult<Vec<Contract>> {
        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl StorageProvider<Uuid, Contract> for SqlContractRepository {
    async fn exists(&self, key: &Uuid) -> ServiceResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE id = ?")
            .bind(key.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("checking contract existence", e))?;

        Ok(count > 0)
    }

    async fn get_all(&self) -> ServiceResult<Vec<Contract>> {
        let rows = sqlx::query(&format!("{} ORDER BY start_date", SELECT_CONTRACT))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("listing contracts", e))?;

        Self::from_rows(&rows)
    }

    async fn get(&self, key: &Uuid) -> ServiceResult<Option<Contract>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_CONTRACT))
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("retrieving contract", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, contract: Contract) -> ServiceResult<Contract> {
        let id = contract.id.unwrap_or_else(Uuid::new_v4);

        sqlx::query(
            r#"
            INSERT INTO contracts (id, client_id, vehicle_id, start_date, end_date, status)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (id)
            DO UPDATE SET
                client_id = excluded.client_id,
                vehicle_id = excluded.vehicle_id,
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                status = excluded.status
            "#,
        )
        .bind(id.to_string())
        .bind(contract.client_id.to_string())
        .bind(contract.vehicle_id.to_string())
        .bind(contract.start_date)
        .bind(contract.end_date)
        .bind(contract.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("saving contract", e))?;

        Ok(Contract {
            id: Some(id),
            ..contract
        })
    }

    async fn delete(&self, key: &Uuid) -> ServiceResult<()> {
        sqlx::query("DELETE FROM contracts WHERE id = ?")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("deleting contract", e))?;

        Ok(())
    }
}

#[async_trait]
impl ContractStorageProvider for SqlContractRepository {
    async fn find_by_client(&self, client_id: &Uuid) -> ServiceResult<Vec<Contract>> {
        let rows = sqlx::query(&format!(
            "{} WHERE client_id = ? ORDER BY start_date",
            SELECT_CONTRACT
        ))
        .bind(client_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("listing contracts by client", e))?;

        Self::from_rows(&rows)
    }

    async fn find_by_vehicle(&self, vehicle_id: &Uuid) -> ServiceResult<Vec<Contract>> {
        let rows = sqlx::query(&format!(
            "{} WHERE vehicle_id = ? ORDER BY start_date",
            SELECT_CONTRACT
        ))
        .bind(vehicle_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("listing contracts by vehicle", e))?;

        Self::from_rows(&rows)
    }

    async fn find_by_vehicle_between(
        &self,
        vehicle_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Contract>> {
        // ISO dates compare correctly as text
        let rows = sqlx::query(&format!(
            "{} WHERE vehicle_id = ? AND start_date <= ? AND end_date >= ? ORDER BY start_date",
            SELECT_CONTRACT
        ))
        .bind(vehicle_id.to_string())
        .bind(end)
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("listing overlapping contracts", e))?;

        Self::from_rows(&rows)
    }
}
