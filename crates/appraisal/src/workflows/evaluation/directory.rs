use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::domain::EmployeeId;

/// Read access to the reporting hierarchy owned by the HR system.
pub trait OrgDirectory: Send + Sync {
    fn contains(&self, employee: &EmployeeId) -> Result<bool, DirectoryError>;
    fn manager_of(&self, employee: &EmployeeId) -> Result<Option<EmployeeId>, DirectoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Employee id to optional manager id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    entries: Arc<RwLock<BTreeMap<EmployeeId, Option<EmployeeId>>>>,
}

impl InMemoryDirectory {
    /// Builder used while assembling a directory. A single insert cannot leave the map
    /// half-written, so a poisoned lock is recovered instead of dropping the entry.
    pub fn with_employee(self, employee: &str, manager: Option<&str>) -> Self {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry_key(employee), manager.map(entry_key));
        self
    }

    pub fn register(&self, employee: &str, manager: Option<&str>) -> Result<(), DirectoryError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| DirectoryError::Unavailable("directory lock poisoned".to_string()))?;
        guard.insert(entry_key(employee), manager.map(entry_key));
        Ok(())
    }
}

fn entry_key(id: &str) -> EmployeeId {
    EmployeeId(id.to_string())
}

impl OrgDirectory for InMemoryDirectory {
    fn contains(&self, employee: &EmployeeId) -> Result<bool, DirectoryError> {
        let guard = self
            .entries
            .read()
            .map_err(|_| DirectoryError::Unavailable("directory lock poisoned".to_string()))?;
        Ok(guard.contains_key(employee))
    }

    fn manager_of(&self, employee: &EmployeeId) -> Result<Option<EmployeeId>, DirectoryError> {
        let guard = self
            .entries
            .read()
            .map_err(|_| DirectoryError::Unavailable("directory lock poisoned".to_string()))?;
        Ok(guard.get(employee).cloned().flatten())
    }
}
