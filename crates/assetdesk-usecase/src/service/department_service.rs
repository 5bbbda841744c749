//! Department Service

use tracing::info;

use assetdesk_domain::error::{EntityKind, Result};
use assetdesk_domain::model::department::Department;
use assetdesk_domain::model::ids::DepartmentId;
use assetdesk_domain::repository::UnitOfWork;

use super::found;

pub struct DepartmentService<S> {
    store: S,
}

impl<S: UnitOfWork> DepartmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add(&mut self, name: &str) -> Result<Department> {
        let department = Department::new(name)?;
        let stored = self
            .store
            .transaction(|tx| tx.insert_department(department))?;
        info!(department_id = ?stored.id(), name = stored.name(), "department added");
        Ok(stored)
    }

    pub fn get_by_id(&self, id: DepartmentId) -> Result<Department> {
        found(
            self.store.find_department(id)?,
            EntityKind::Department,
            id.get(),
        )
    }

    pub fn get_all(&self) -> Result<Vec<Department>> {
        Ok(self.store.list_departments()?)
    }

    /// Rename a department
    pub fn update(&mut self, id: DepartmentId, name: &str) -> Result<Department> {
        self.store.transaction(|tx| -> Result<Department> {
            let mut department = found(tx.find_department(id)?, EntityKind::Department, id.get())?;
            department.rename(name)?;
            tx.update_department(&department)?;
            info!(department_id = %id, name = department.name(), "department renamed");
            Ok(department)
        })
    }
}
