//! In-Memory Store
//!
//! One store holds every table, so a transaction can cover writes to
//! several entity kinds. Clones share the same tables.
//!
//! Transactions snapshot the tables on entry and put the snapshot back if
//! the work fails. When a snapshot file is configured, every committed
//! transaction is written to it; a failed write rolls the transaction back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use assetdesk_domain::error::EntityKind;
use assetdesk_domain::model::account::Account;
use assetdesk_domain::model::department::Department;
use assetdesk_domain::model::employee::Employee;
use assetdesk_domain::model::hardware_asset::HardwareAsset;
use assetdesk_domain::model::ids::{
    AccountId, DepartmentId, EmployeeId, HardwareAssetId, SoftwareAssetId,
};
use assetdesk_domain::model::software_asset::{SoftwareAsset, SoftwareKey};
use assetdesk_domain::repository::{
    AccountRepository, DepartmentRepository, EmployeeRepository, HardwareAssetRepository,
    RepositoryError, SoftwareAssetRepository, UnitOfWork,
};

use super::file_system;

/// Last id handed out per table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Sequences {
    department: u64,
    employee: u64,
    account: u64,
    hardware: u64,
    software: u64,
}

/// Every table of the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    #[serde(default)]
    sequences: Sequences,
    #[serde(default)]
    departments: BTreeMap<u64, Department>,
    #[serde(default)]
    employees: BTreeMap<u64, Employee>,
    #[serde(default)]
    accounts: BTreeMap<u64, Account>,
    #[serde(default)]
    hardware: BTreeMap<u64, HardwareAsset>,
    #[serde(default)]
    software: BTreeMap<u64, SoftwareAsset>,
}

/// In-memory Persistence Gateway
///
/// Thread-safe implementation using RwLock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    snapshot_path: Option<PathBuf>,
    depth: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by a JSON snapshot file
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first commit.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let state = file_system::load_snapshot(&path)?.unwrap_or_default();
        debug!(path = %path.display(), "opened snapshot-backed store");
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            snapshot_path: Some(path),
            depth: 0,
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, RepositoryError> {
        self.state.read().map_err(|_| RepositoryError::Persistence {
            message: "Failed to acquire read lock".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, RepositoryError> {
        self.state.write().map_err(|_| RepositoryError::Persistence {
            message: "Failed to acquire write lock".to_string(),
        })
    }

    fn persist(&self) -> Result<(), RepositoryError> {
        match &self.snapshot_path {
            Some(path) => file_system::write_snapshot(path, &*self.read()?),
            None => Ok(()),
        }
    }
}

fn identity(entity: EntityKind, id: Option<u64>) -> Result<u64, RepositoryError> {
    id.ok_or(RepositoryError::MissingIdentity { entity })
}

fn replace<V: Clone>(
    table: &mut BTreeMap<u64, V>,
    entity: EntityKind,
    id: u64,
    value: &V,
) -> Result<(), RepositoryError> {
    match table.get_mut(&id) {
        Some(slot) => {
            *slot = value.clone();
            Ok(())
        }
        None => Err(RepositoryError::NotFound { entity, id }),
    }
}

fn remove<V>(
    table: &mut BTreeMap<u64, V>,
    entity: EntityKind,
    id: u64,
) -> Result<(), RepositoryError> {
    table
        .remove(&id)
        .map(|_| ())
        .ok_or(RepositoryError::NotFound { entity, id })
}

fn next(sequence: &mut u64) -> u64 {
    *sequence += 1;
    *sequence
}

impl UnitOfWork for InMemoryStore {
    fn transaction<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        // Nested calls join the outermost transaction
        if self.depth > 0 {
            return work(self);
        }

        let before = self.read()?.clone();
        self.depth += 1;
        let result = work(self);
        self.depth -= 1;

        let result = match result {
            Ok(value) => self.persist().map(|_| value).map_err(E::from),
            Err(err) => Err(err),
        };

        if result.is_err() {
            *self.write()? = before;
            debug!("transaction rolled back");
        } else {
            debug!("transaction committed");
        }
        result
    }
}

impl DepartmentRepository for InMemoryStore {
    fn insert_department(&mut self, department: Department) -> Result<Department, RepositoryError> {
        let mut state = self.write()?;
        let id = next(&mut state.sequences.department);
        let department = department.with_id(DepartmentId::new(id));
        state.departments.insert(id, department.clone());
        Ok(department)
    }

    fn update_department(&mut self, department: &Department) -> Result<(), RepositoryError> {
        let id = identity(EntityKind::Department, department.id().map(DepartmentId::get))?;
        replace(&mut self.write()?.departments, EntityKind::Department, id, department)
    }

    fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        Ok(self.read()?.departments.get(&id.get()).cloned())
    }

    fn list_departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.read()?.departments.values().cloned().collect())
    }
}

impl EmployeeRepository for InMemoryStore {
    fn insert_employee(&mut self, employee: Employee) -> Result<Employee, RepositoryError> {
        let mut state = self.write()?;
        let id = next(&mut state.sequences.employee);
        let employee = employee.with_id(EmployeeId::new(id));
        state.employees.insert(id, employee.clone());
        Ok(employee)
    }

    fn update_employee(&mut self, employee: &Employee) -> Result<(), RepositoryError> {
        let id = identity(EntityKind::Employee, employee.id().map(EmployeeId::get))?;
        replace(&mut self.write()?.employees, EntityKind::Employee, id, employee)
    }

    fn delete_employee(&mut self, id: EmployeeId) -> Result<(), RepositoryError> {
        remove(&mut self.write()?.employees, EntityKind::Employee, id.get())
    }

    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(self.read()?.employees.get(&id.get()).cloned())
    }

    fn employees_in_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self
            .read()?
            .employees
            .values()
            .filter(|e| e.department_id() == department_id)
            .cloned()
            .collect())
    }
}

impl AccountRepository for InMemoryStore {
    fn insert_account(&mut self, account: Account) -> Result<Account, RepositoryError> {
        let mut state = self.write()?;
        if state.accounts.values().any(|a| a.email() == account.email()) {
            return Err(RepositoryError::UniqueViolation {
                entity: EntityKind::Account,
                key: account.email().to_string(),
            });
        }
        let id = next(&mut state.sequences.account);
        let account = account.with_id(AccountId::new(id));
        state.accounts.insert(id, account.clone());
        Ok(account)
    }

    fn update_account(&mut self, account: &Account) -> Result<(), RepositoryError> {
        let id = identity(EntityKind::Account, account.id().map(AccountId::get))?;
        let mut state = self.write()?;
        if state
            .accounts
            .iter()
            .any(|(other, a)| *other != id && a.email() == account.email())
        {
            return Err(RepositoryError::UniqueViolation {
                entity: EntityKind::Account,
                key: account.email().to_string(),
            });
        }
        replace(&mut state.accounts, EntityKind::Account, id, account)
    }

    fn delete_account(&mut self, id: AccountId) -> Result<(), RepositoryError> {
        remove(&mut self.write()?.accounts, EntityKind::Account, id.get())
    }

    fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.read()?.accounts.get(&id.get()).cloned())
    }

    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|a| a.email() == email)
            .cloned())
    }

    fn find_account_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|a| a.employee_id() == Some(employee_id))
            .cloned())
    }

    fn list_accounts(&self) -> Result<Vec<Account>, RepositoryError> {
        Ok(self.read()?.accounts.values().cloned().collect())
    }
}

impl HardwareAssetRepository for InMemoryStore {
    fn insert_hardware(
        &mut self,
        hardware: HardwareAsset,
    ) -> Result<HardwareAsset, RepositoryError> {
        let mut state = self.write()?;
        let id = next(&mut state.sequences.hardware);
        let hardware = hardware.with_id(HardwareAssetId::new(id));
        state.hardware.insert(id, hardware.clone());
        Ok(hardware)
    }

    fn update_hardware(&mut self, hardware: &HardwareAsset) -> Result<(), RepositoryError> {
        let id = identity(EntityKind::HardwareAsset, hardware.id().map(HardwareAssetId::get))?;
        replace(&mut self.write()?.hardware, EntityKind::HardwareAsset, id, hardware)
    }

    fn delete_hardware(&mut self, id: HardwareAssetId) -> Result<(), RepositoryError> {
        remove(&mut self.write()?.hardware, EntityKind::HardwareAsset, id.get())
    }

    fn find_hardware(&self, id: HardwareAssetId) -> Result<Option<HardwareAsset>, RepositoryError> {
        Ok(self.read()?.hardware.get(&id.get()).cloned())
    }

    fn hardware_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<HardwareAsset>, RepositoryError> {
        Ok(self
            .read()?
            .hardware
            .values()
            .filter(|h| h.employee_id() == Some(employee_id))
            .cloned()
            .collect())
    }

    fn hardware_for_software(
        &self,
        software_id: SoftwareAssetId,
    ) -> Result<Vec<HardwareAsset>, RepositoryError> {
        Ok(self
            .read()?
            .hardware
            .values()
            .filter(|h| h.software_id() == Some(software_id))
            .cloned()
            .collect())
    }
}

impl SoftwareAssetRepository for InMemoryStore {
    fn insert_software(
        &mut self,
        software: SoftwareAsset,
    ) -> Result<SoftwareAsset, RepositoryError> {
        let mut state = self.write()?;
        let key = software.key();
        if state.software.values().any(|s| s.is_same_package(&key)) {
            return Err(RepositoryError::UniqueViolation {
                entity: EntityKind::SoftwareAsset,
                key: key.to_string(),
            });
        }
        let id = next(&mut state.sequences.software);
        let software = software.with_id(SoftwareAssetId::new(id));
        state.software.insert(id, software.clone());
        Ok(software)
    }

    fn update_software(&mut self, software: &SoftwareAsset) -> Result<(), RepositoryError> {
        let id = identity(EntityKind::SoftwareAsset, software.id().map(SoftwareAssetId::get))?;
        let key = software.key();
        let mut state = self.write()?;
        if state
            .software
            .iter()
            .any(|(other, s)| *other != id && s.is_same_package(&key))
        {
            return Err(RepositoryError::UniqueViolation {
                entity: EntityKind::SoftwareAsset,
                key: key.to_string(),
            });
        }
        replace(&mut state.software, EntityKind::SoftwareAsset, id, software)
    }

    fn delete_software(&mut self, id: SoftwareAssetId) -> Result<(), RepositoryError> {
        remove(&mut self.write()?.software, EntityKind::SoftwareAsset, id.get())
    }

    fn find_software(&self, id: SoftwareAssetId) -> Result<Option<SoftwareAsset>, RepositoryError> {
        Ok(self.read()?.software.get(&id.get()).cloned())
    }

    fn find_software_by_key(
        &self,
        key: &SoftwareKey,
    ) -> Result<Option<SoftwareAsset>, RepositoryError> {
        Ok(self
            .read()?
            .software
            .values()
            .find(|s| s.is_same_package(key))
            .cloned())
    }

    fn list_software(&self) -> Result<Vec<SoftwareAsset>, RepositoryError> {
        Ok(self.read()?.software.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_domain::model::account::PasswordHash;

    fn department(name: &str) -> Department {
        Department::new(name).unwrap()
    }

    fn account(email: &str) -> Account {
        Account::new(email, PasswordHash::from_phc("$argon2id$stub")).unwrap()
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = InMemoryStore::new();

        let it = store.insert_department(department("IT")).unwrap();
        let hr = store.insert_department(department("HR")).unwrap();

        assert_eq!(it.id(), Some(DepartmentId::new(1)));
        assert_eq!(hr.id(), Some(DepartmentId::new(2)));
        assert_eq!(store.list_departments().unwrap().len(), 2);
    }

    #[test]
    fn test_clones_share_tables() {
        let mut store = InMemoryStore::new();
        let view = store.clone();

        store.insert_department(department("IT")).unwrap();

        assert_eq!(view.list_departments().unwrap().len(), 1);
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let mut store = InMemoryStore::new();
        let ghost = department("Ghost").with_id(DepartmentId::new(42));

        assert_eq!(
            store.update_department(&ghost),
            Err(RepositoryError::NotFound {
                entity: EntityKind::Department,
                id: 42
            })
        );
        assert!(matches!(
            store.delete_employee(EmployeeId::new(3)),
            Err(RepositoryError::NotFound { .. })
        ));
        assert_eq!(
            store.update_department(&department("Unsaved")),
            Err(RepositoryError::MissingIdentity {
                entity: EntityKind::Department
            })
        );
    }

    #[test]
    fn test_unique_account_email() {
        let mut store = InMemoryStore::new();
        store.insert_account(account("ada@example.com")).unwrap();

        let result = store.insert_account(account("ada@example.com"));
        assert!(matches!(result, Err(RepositoryError::UniqueViolation { .. })));
    }

    #[test]
    fn test_unique_software_key() {
        let mut store = InMemoryStore::new();
        let windows = SoftwareAsset::new("Windows 10", "22H2", "Microsoft").unwrap();
        store.insert_software(windows.clone()).unwrap();

        assert!(matches!(
            store.insert_software(windows),
            Err(RepositoryError::UniqueViolation { .. })
        ));
        assert_eq!(store.list_software().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let mut store = InMemoryStore::new();

        let result = store.transaction(|tx| -> Result<(), RepositoryError> {
            tx.insert_department(department("IT"))?;
            tx.insert_account(account("ada@example.com"))?;
            tx.insert_account(account("ada@example.com"))?;
            Ok(())
        });

        assert!(result.is_err());
        assert!(store.list_departments().unwrap().is_empty());
        assert!(store.list_accounts().unwrap().is_empty());
    }

    #[test]
    fn test_successful_transaction_commits() {
        let mut store = InMemoryStore::new();

        let id = store
            .transaction(|tx| -> Result<_, RepositoryError> {
                let it = tx.insert_department(department("IT"))?;
                Ok(it.id())
            })
            .unwrap();

        assert!(store.find_department(id.unwrap()).unwrap().is_some());
    }

    #[test]
    fn test_nested_transaction_joins_outer() {
        let mut store = InMemoryStore::new();

        let result = store.transaction(|tx| -> Result<(), RepositoryError> {
            tx.transaction(|inner| -> Result<(), RepositoryError> {
                inner.insert_department(department("IT"))?;
                Ok(())
            })?;
            Err(RepositoryError::Persistence {
                message: "abort".to_string(),
            })
        });

        assert!(result.is_err());
        assert!(store.list_departments().unwrap().is_empty());
    }
}
