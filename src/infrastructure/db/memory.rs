use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::error::{AppError, Result};
use crate::domain::location::NewLocation;
use crate::infrastructure::db::LocationStore;

/// In-memory store for pipeline tests; records every call it receives.
#[derive(Default)]
pub struct InMemoryLocationStore {
    existing: Mutex<HashSet<(String, String)>>,
    inserted: Mutex<Vec<NewLocation>>,
    insert_calls: Mutex<Vec<usize>>,
    exists_calls: Mutex<Vec<(String, String)>>,
    failing_calls: HashSet<usize>,
    failing_exists: HashSet<(String, String)>,
    under_reported: usize,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(self, address: &str, suburb: &str) -> Self {
        self.existing
            .lock()
            .unwrap()
            .insert((address.to_string(), suburb.to_string()));
        self
    }

    /// Make the `call`-th (0-based) insert fail
    pub fn failing_insert(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    pub fn failing_exists(mut self, address: &str, suburb: &str) -> Self {
        self.failing_exists
            .insert((address.to_string(), suburb.to_string()));
        self
    }

    /// Insert every row but report `missing` fewer than were written
    pub fn under_reporting(mut self, missing: usize) -> Self {
        self.under_reported = missing;
        self
    }

    pub fn insert_calls(&self) -> Vec<usize> {
        self.insert_calls.lock().unwrap().clone()
    }

    pub fn exists_calls(&self) -> Vec<(String, String)> {
        self.exists_calls.lock().unwrap().clone()
    }

    pub fn inserted(&self) -> Vec<NewLocation> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn exists(&self, address: &str, suburb: &str) -> Result<bool> {
        let key = (address.to_string(), suburb.to_string());
        self.exists_calls.lock().unwrap().push(key.clone());
        if self.failing_exists.contains(&key) {
            return Err(AppError::DatabaseError("lookup timed out".to_string()));
        }
        Ok(self.existing.lock().unwrap().contains(&key))
    }

    async fn insert_batch(&self, rows: &[NewLocation]) -> Result<u64> {
        let call = {
            let mut calls = self.insert_calls.lock().unwrap();
            calls.push(rows.len());
            calls.len() - 1
        };

        if self.failing_calls.contains(&call) {
            return Err(AppError::DatabaseError(format!(
                "insert call {} rejected by store",
                call
            )));
        }

        let mut existing = self.existing.lock().unwrap();
        for row in rows {
            existing.insert((row.location.address.clone(), row.location.suburb.clone()));
        }
        self.inserted.lock().unwrap().extend(rows.iter().cloned());
        Ok(rows.len().saturating_sub(self.under_reported) as u64)
    }
}
