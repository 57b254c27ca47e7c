use crate::domain::error::{AppError, Result};
use crate::domain::location::NewLocation;
use crate::infrastructure::db::LocationStore;
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

pub struct SqliteLocationStore {
    pool: SqlitePool,
}

impl SqliteLocationStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to parse connection string: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS locations (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                subcategory TEXT,
                address TEXT NOT NULL,
                suburb TEXT NOT NULL,
                state TEXT NOT NULL,
                postcode TEXT NOT NULL,
                country TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                description TEXT,
                email TEXT,
                phone TEXT,
                website TEXT,
                instagram TEXT,
                capacity INTEGER,
                best_for TEXT,
                accessibility_notes TEXT,
                status TEXT NOT NULL,
                source TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create table: {}", e)))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_locations_address_suburb
             ON locations (address, suburb)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create index: {}", e)))?;

        Ok(())
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count locations: {}", e)))
    }

    #[cfg(test)]
    pub async fn find_by_address(&self, address: &str, suburb: &str) -> Result<Vec<StoredLocation>> {
        sqlx::query_as::<_, StoredLocation>(
            "SELECT id, name, category, address, suburb, state, postcode, status, source, created_by
             FROM locations WHERE address = ? AND suburb = ? ORDER BY created_at ASC",
        )
        .bind(address)
        .bind(suburb)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch locations: {}", e)))
    }
}

#[async_trait]
impl LocationStore for SqliteLocationStore {
    async fn exists(&self, address: &str, suburb: &str) -> Result<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM locations WHERE address = ? AND suburb = ? LIMIT 1")
                .bind(address)
                .bind(suburb)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to check for duplicate: {}", e))
                })?;

        Ok(found.is_some())
    }

    async fn insert_batch(&self, rows: &[NewLocation]) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let created_at = chrono::Utc::now();
        let mut affected: u64 = 0;
        for row in rows {
            let location = &row.location;
            let res = sqlx::query(
                "INSERT INTO locations (
                    id, name, category, subcategory, address, suburb, state, postcode, country,
                    latitude, longitude, description, email, phone, website, instagram, capacity,
                    best_for, accessibility_notes, status, source, created_by, created_at
                 ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&location.name)
            .bind(location.category.as_str())
            .bind(&location.subcategory)
            .bind(&location.address)
            .bind(&location.suburb)
            .bind(location.state.as_str())
            .bind(&location.postcode)
            .bind(&location.country)
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(&location.description)
            .bind(&location.email)
            .bind(&location.phone)
            .bind(&location.website)
            .bind(&location.instagram)
            .bind(location.capacity.map(i64::from))
            .bind(&location.best_for)
            .bind(&location.accessibility_notes)
            .bind(row.status.as_str())
            .bind(row.source)
            .bind(&row.created_by)
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!(
                    "Failed to insert location from row {}: {}",
                    location.row_number, e
                ))
            })?;
            affected += res.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(affected)
    }
}

// Read-back projection of a stored location
#[cfg(test)]
#[derive(Debug, sqlx::FromRow)]
pub struct StoredLocation {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub status: String,
    pub source: String,
    pub created_by: String,
}
