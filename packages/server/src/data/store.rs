use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

use crate::data::Object;

/// The tables the store serves. All share one schema; rows in different
/// tables are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Admins,
    Users,
    Devices,
    Signups,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Admins,
        TableKind::Users,
        TableKind::Devices,
        TableKind::Signups,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Admins => "admins",
            TableKind::Users => "users",
            TableKind::Devices => "devices",
            TableKind::Signups => "signup",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found")]
    NotFound,
    #[error("object already exists")]
    Conflict,
    #[error("attributes are not JSON-serializable: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
            other => StoreError::Database(other),
        }
    }
}

/// CRUD over the shared-schema tables, on an injected connection pool.
///
/// `provision` must run once before serving; it creates each table and its
/// owner index if they do not exist yet.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table and its owner_id index.
    ///
    /// Index names are database-global in SQLite, so each table gets its own.
    pub async fn provision(&self) -> Result<(), StoreError> {
        for table in TableKind::ALL {
            let create = format!(
                "CREATE TABLE IF NOT EXISTS {t} (
                    id TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    owner_id TEXT NOT NULL,
                    version TEXT,
                    attributes TEXT,
                    PRIMARY KEY (id)
                )",
                t = table.as_str()
            );
            sqlx::query(&create).execute(&self.pool).await?;

            let index = format!(
                "CREATE INDEX IF NOT EXISTS idx_{t}_owner_id ON {t}(owner_id)",
                t = table.as_str()
            );
            sqlx::query(&index).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// All objects whose owner_id matches, in storage order. An empty result
    /// is not an error.
    pub async fn list_by_owner(
        &self,
        table: TableKind,
        owner_id: &str,
    ) -> Result<Vec<Object>, StoreError> {
        let query = format!(
            "SELECT id, created_at, updated_at, owner_id, version, attributes
             FROM {} WHERE owner_id = ?",
            table.as_str()
        );
        let rows = sqlx::query(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(object_from_row).collect()
    }

    /// Insert a new row. Attributes are serialized before any database
    /// access, so a serialization failure leaves the table untouched.
    /// A duplicate id fails with `StoreError::Conflict`.
    pub async fn insert(&self, table: TableKind, obj: &Object) -> Result<(), StoreError> {
        let attrs_json = serde_json::to_string(&obj.attributes)?;
        let now = Utc::now();

        let query = format!(
            "INSERT INTO {} (id, created_at, updated_at, owner_id, version, attributes)
             VALUES (?, ?, ?, ?, ?, ?)",
            table.as_str()
        );
        sqlx::query(&query)
            .bind(&obj.id)
            .bind(now.to_rfc3339())
            .bind(now.to_rfc3339())
            .bind(&obj.owner_id)
            .bind(obj.version.to_string())
            .bind(attrs_json)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, table: TableKind, id: &str) -> Result<Object, StoreError> {
        let query = format!(
            "SELECT id, created_at, updated_at, owner_id, version, attributes
             FROM {} WHERE id = ?",
            table.as_str()
        );
        let row = sqlx::query(&query).bind(id).fetch_one(&self.pool).await?;
        object_from_row(&row)
    }

    /// Replace owner_id, version, and attributes for the matching row and
    /// stamp updated_at. A missing id is a silent no-op, matching the
    /// underlying affected-row semantics.
    pub async fn update_by_id(
        &self,
        table: TableKind,
        id: &str,
        obj: &Object,
    ) -> Result<(), StoreError> {
        let attrs_json = serde_json::to_string(&obj.attributes)?;

        let query = format!(
            "UPDATE {} SET updated_at = ?, owner_id = ?, version = ?, attributes = ? WHERE id = ?",
            table.as_str()
        );
        sqlx::query(&query)
            .bind(Utc::now().to_rfc3339())
            .bind(&obj.owner_id)
            .bind(obj.version.to_string())
            .bind(attrs_json)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove the row. A missing id is a silent no-op.
    pub async fn delete_by_id(&self, table: TableKind, id: &str) -> Result<(), StoreError> {
        let query = format!("DELETE FROM {} WHERE id = ?", table.as_str());
        sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}

fn object_from_row(row: &SqliteRow) -> Result<Object, StoreError> {
    let id: String = row.try_get("id")?;

    let version: String = row.try_get("version")?;
    let version = version
        .parse::<i64>()
        .map_err(|_| StoreError::Corrupt(format!("non-numeric version for object {}", id)))?;

    let attrs_json: String = row.try_get("attributes")?;
    let attributes = serde_json::from_str(&attrs_json)?;

    Ok(Object {
        created_at: parse_timestamp(row.try_get("created_at")?, &id)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?, &id)?,
        owner_id: row.try_get("owner_id")?,
        id,
        version,
        attributes,
    })
}

fn parse_timestamp(value: String, id: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp for object {}: {}", id, e)))
}
