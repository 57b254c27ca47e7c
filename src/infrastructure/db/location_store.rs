use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::location::NewLocation;

/// Record store the import pipeline loads into.
///
/// `insert_batch` must insert every row or none of them and report the
/// number of rows written.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Exact address + suburb match against existing records
    async fn exists(&self, address: &str, suburb: &str) -> Result<bool>;

    async fn insert_batch(&self, rows: &[NewLocation]) -> Result<u64>;
}
