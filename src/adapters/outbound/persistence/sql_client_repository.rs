use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

use super::sql_support::{column, map_db_error, uuid_column};
use crate::{
    domain::{errors::ServiceResult, models::Client},
    ports::repositories::{ClientStorageProvider, StorageProvider},
};

const SELECT_CLIENT: &str = r#"
    SELECT id, last_name, first_name, date_of_birth, license_number, address
    FROM clients
"#;

/// SQL-based implementation of ClientStorageProvider using SQLite
#[derive(Clone)]
pub struct SqlClientRepository {
    pool: SqlitePool,
}

impl SqlClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the clients table and its unique constraints
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY NOT NULL,
                last_name TEXT NOT NULL,
                first_name TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                license_number TEXT NOT NULL UNIQUE,
                address TEXT NOT NULL,
                UNIQUE (last_name, first_name, date_of_birth)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn from_row(row: &SqliteRow) -> ServiceResult<Client> {
        Ok(Client {
            id: Some(uuid_column(row, "id")?),
            last_name: column(row, "last_name")?,
            first_name: column(row, "first_name")?,
            date_of_birth: column(row, "date_of_birth")?,
            license_number: column(row, "license_number")?,
            address: column(row, "address")?,
        })
    }
}

#[async_trait]
impl StorageProvider<Uuid, Client> for SqlClientRepository {
    async fn exists(&self, key: &Uuid) -> ServiceResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE id = ?")
            .bind(key.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("checking client existence", e))?;

        Ok(count > 0)
    }

    async fn get_all(&self) -> ServiceResult<Vec<Client>> {
        let rows = sqlx::query(&format!("{} ORDER BY last_name, first_name", SELECT_CLIENT))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("listing clients", e))?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn get(&self, key: &Uuid) -> ServiceResult<Option<Client>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_CLIENT))
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("retrieving client", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn save(&self, client: Client) -> ServiceResult<Client> {
        let id = client.id.unwrap_or_else(Uuid::new_v4);

        sqlx::query(
            r#"
            INSERT INTO clients (
                id, last_name, first_name, date_of_birth, license_number, address
            )
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (id)
            DO UPDATE SET
                last_name = excluded.last_name,
                first_name = excluded.first_name,
                date_of_birth = excluded.date_of_birth,
                license_number = excluded.license_number,
                address = excluded.address
            "#,
        )
        .bind(id.to_string())
        .bind(&client.last_name)
        .bind(&client.first_name)
        .bind(client.date_of_birth)
        .bind(&client.license_number)
        .bind(&client.address)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("saving client", e))?;

        Ok(Client {
            id: Some(id),
            ..client
        })
    }

    async fn delete(&self, key: &Uuid) -> ServiceResult<()> {
        sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("deleting client", e))?;

        Ok(())
    }
}

#[async_trait]
impl ClientStorageProvider for SqlClientRepository {
    async fn find_by_license_number(&self, license_number: &str) -> ServiceResult<Option<Client>> {
        let row = sqlx::query(&format!("{} WHERE license_number = ?", SELECT_CLIENT))
            .bind(license_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("finding client by license number", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn find_by_identity(
        &self,
        last_name: &str,
        first_name: &str,
        date_of_birth: NaiveDate,
    ) -> ServiceResult<Option<Client>> {
        let row = sqlx::query(&format!(
            "{} WHERE last_name = ? AND first_name = ? AND date_of_birth = ?",
            SELECT_CLIENT
        ))
        .bind(last_name)
        .bind(first_name)
        .bind(date_of_birth)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("finding client by identity", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }
}
