use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ApplicationId, SavedApplication};

/// Storage abstraction for saved applications. Records are append-only.
pub trait ApplicationStore: Send + Sync {
    fn put(&self, record: SavedApplication) -> Result<SavedApplication, RepositoryError>;
    fn get(&self, id: &ApplicationId) -> Result<Option<SavedApplication>, RepositoryError>;
    /// Every record in insertion order.
    fn list(&self) -> Result<Vec<SavedApplication>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime store. Contents are lost on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationStore {
    records: Arc<Mutex<Vec<SavedApplication>>>,
}

impl InMemoryApplicationStore {
    fn records(&self) -> Result<MutexGuard<'_, Vec<SavedApplication>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl ApplicationStore for InMemoryApplicationStore {
    fn put(&self, record: SavedApplication) -> Result<SavedApplication, RepositoryError> {
        let mut records = self.records()?;
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &ApplicationId) -> Result<Option<SavedApplication>, RepositoryError> {
        let records = self.records()?;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<SavedApplication>, RepositoryError> {
        Ok(self.records()?.clone())
    }
}
