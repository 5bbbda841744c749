//! JSON snapshot file for the in-memory store
//!
//! The whole store is written as one JSON document. Writes go to a temporary
//! file in the same directory which then replaces the target, so a crash
//! mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use assetdesk_domain::repository::RepositoryError;

use super::in_memory::StoreState;

fn persistence_error(context: &str, err: impl core::fmt::Display) -> RepositoryError {
    RepositoryError::Persistence {
        message: format!("{}: {}", context, err),
    }
}

/// Read a snapshot; `Ok(None)` when the file does not exist yet
pub(crate) fn load_snapshot(path: &Path) -> Result<Option<StoreState>, RepositoryError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(persistence_error("Failed to read snapshot", err)),
    };

    let state = serde_json::from_str(&content)
        .map_err(|err| persistence_error("Failed to parse snapshot", err))?;
    debug!(path = %path.display(), "loaded snapshot");
    Ok(Some(state))
}

/// Atomically replace the snapshot at `path`
pub(crate) fn write_snapshot(path: &Path, state: &StoreState) -> Result<(), RepositoryError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let json = serde_json::to_vec_pretty(state)
        .map_err(|err| persistence_error("Failed to serialize snapshot", err))?;

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|err| persistence_error("Failed to create snapshot file", err))?;
    file.write_all(&json)
        .map_err(|err| persistence_error("Failed to write snapshot", err))?;
    file.persist(path)
        .map_err(|err| persistence_error("Failed to replace snapshot", err.error))?;

    debug!(path = %path.display(), bytes = json.len(), "wrote snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::in_memory::InMemoryStore;
    use assetdesk_domain::model::department::Department;
    use assetdesk_domain::model::hardware_asset::HardwareAsset;
    use assetdesk_domain::model::ids::{DepartmentId, EmployeeId, SoftwareAssetId};
    use assetdesk_domain::repository::{
        DepartmentRepository, HardwareAssetRepository, RepositoryError, UnitOfWork,
    };
    use chrono::Utc;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = InMemoryStore::open(dir.path().join("store.json")).unwrap();

        assert!(store.list_departments().unwrap().is_empty());
    }

    #[test]
    fn test_committed_transaction_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let linked_at = Utc::now();

        {
            let mut store = InMemoryStore::open(&path).unwrap();
            store
                .transaction(|tx| -> Result<(), RepositoryError> {
                    tx.insert_department(Department::new("IT").unwrap())?;
                    let mut laptop =
                        HardwareAsset::new("Laptop", "X1", "Lenovo", "Notebook", "192.168.0.1")
                            .unwrap()
                            .with_employee(EmployeeId::new(1));
                    laptop.link_software(SoftwareAssetId::new(1), linked_at);
                    tx.insert_hardware(laptop)?;
                    Ok(())
                })
                .unwrap();
        }

        let store = InMemoryStore::open(&path).unwrap();
        let it = store.find_department(DepartmentId::new(1)).unwrap().unwrap();
        assert_eq!(it.name(), "IT");

        let hardware = store.hardware_for_employee(EmployeeId::new(1)).unwrap();
        assert_eq!(hardware.len(), 1);
        assert_eq!(hardware[0].software().unwrap().linked_at, linked_at);
    }

    #[test]
    fn test_reopened_store_continues_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = InMemoryStore::open(&path).unwrap();
            store
                .transaction(|tx| -> Result<(), RepositoryError> {
                    tx.insert_department(Department::new("IT").unwrap())?;
                    Ok(())
                })
                .unwrap();
        }

        let mut store = InMemoryStore::open(&path).unwrap();
        let hr = store
            .insert_department(Department::new("HR").unwrap())
            .unwrap();
        assert_eq!(hr.id(), Some(DepartmentId::new(2)));
    }

    #[test]
    fn test_corrupt_snapshot_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            InMemoryStore::open(&path),
            Err(RepositoryError::Persistence { .. })
        ));
    }
}
