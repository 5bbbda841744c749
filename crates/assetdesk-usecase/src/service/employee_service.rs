//! Employee Service
//!
//! Employees belong to exactly one existing department. An employee cannot
//! be deleted while hardware is assigned to them or an account is bound to
//! them, and an employee with an admin account cannot leave the admin
//! department.

use tracing::{info, warn};

use assetdesk_domain::error::{
    EntityKind, InventoryError, RelationshipPreconditionError, Result,
};
use assetdesk_domain::model::employee::{Employee, EmployeeInput};
use assetdesk_domain::model::ids::{DepartmentId, EmployeeId};
use assetdesk_domain::repository::{DepartmentRepository, UnitOfWork};
use assetdesk_domain::service::admin_policy::AdminPolicy;

use super::found;

pub struct EmployeeService<S> {
    store: S,
    policy: AdminPolicy,
}

impl<S: UnitOfWork> EmployeeService<S> {
    pub fn new(store: S, policy: AdminPolicy) -> Self {
        Self { store, policy }
    }

    pub fn add(&mut self, input: &EmployeeInput) -> Result<Employee> {
        let employee = Employee::from_input(input)?;
        let stored = self.store.transaction(|tx| -> Result<Employee> {
            require_department(tx, employee.department_id())?;
            Ok(tx.insert_employee(employee)?)
        })?;
        info!(
            employee_id = ?stored.id(),
            department_id = %stored.department_id(),
            "employee added"
        );
        Ok(stored)
    }

    pub fn get_by_id(&self, id: EmployeeId) -> Result<Employee> {
        found(self.store.find_employee(id)?, EntityKind::Employee, id.get())
    }

    /// Every employee of one department
    pub fn get_all_for(&self, department_id: DepartmentId) -> Result<Vec<Employee>> {
        if !self.store.department_exists(department_id)? {
            return Err(InventoryError::not_found(
                EntityKind::Department,
                department_id.get(),
            ));
        }
        Ok(self.store.employees_in_department(department_id)?)
    }

    /// Replace every editable field of an employee
    pub fn update(&mut self, id: EmployeeId, input: &EmployeeInput) -> Result<Employee> {
        // Reject bad input before touching storage
        Employee::from_input(input)?;
        let policy = self.policy;

        self.store.transaction(|tx| -> Result<Employee> {
            let mut employee = found(tx.find_employee(id)?, EntityKind::Employee, id.get())?;
            require_department(tx, input.department_id)?;

            let holds_admin = tx
                .find_account_by_employee(id)?
                .is_some_and(|account| account.is_admin());
            if holds_admin && input.department_id != policy.admin_department() {
                warn!(employee_id = %id, "admin employee cannot leave the admin department");
                return Err(
                    RelationshipPreconditionError::NotInAdminDepartment { employee: id }.into(),
                );
            }

            employee.apply_input(input)?;
            tx.update_employee(&employee)?;
            info!(employee_id = %id, "employee updated");
            Ok(employee)
        })
    }

    pub fn delete(&mut self, id: EmployeeId) -> Result<()> {
        self.store.transaction(|tx| -> Result<()> {
            found(tx.find_employee(id)?, EntityKind::Employee, id.get())?;

            let in_use = !tx.hardware_for_employee(id)?.is_empty()
                || tx.find_account_by_employee(id)?.is_some();
            if in_use {
                warn!(employee_id = %id, "refusing to delete referenced employee");
                return Err(RelationshipPreconditionError::EmployeeInUse(id).into());
            }

            tx.delete_employee(id)?;
            info!(employee_id = %id, "employee deleted");
            Ok(())
        })
    }
}

fn require_department<S>(store: &S, id: DepartmentId) -> Result<()>
where
    S: DepartmentRepository + ?Sized,
{
    if store.department_exists(id)? {
        Ok(())
    } else {
        Err(RelationshipPreconditionError::MissingDepartment(id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_adapter::InMemoryStore;
    use assetdesk_domain::model::department::Department;

    fn setup() -> (EmployeeService<InMemoryStore>, DepartmentId) {
        let mut store = InMemoryStore::new();
        let it = store
            .insert_department(Department::new("IT").unwrap())
            .unwrap();
        let service = EmployeeService::new(store, AdminPolicy::default());
        (service, it.id().unwrap())
    }

    fn input(first: &str, department_id: DepartmentId) -> EmployeeInput {
        EmployeeInput {
            first_name: first.to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            department_id,
        }
    }

    #[test]
    fn test_add_employee() {
        let (mut service, it) = setup();

        let ada = service.add(&input("Ada", it)).unwrap();

        assert_eq!(service.get_by_id(ada.id().unwrap()).unwrap(), ada);
        assert_eq!(service.get_all_for(it).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_department_is_precondition() {
        let (mut service, _) = setup();

        let err = service.add(&input("Ada", DepartmentId::new(99))).unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Precondition(RelationshipPreconditionError::MissingDepartment(_))
        ));
    }

    #[test]
    fn test_get_all_for_unknown_department() {
        let (service, _) = setup();
        assert!(matches!(
            service.get_all_for(DepartmentId::new(99)),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_rejects_invalid_input() {
        let (mut service, it) = setup();
        let ada = service.add(&input("Ada", it)).unwrap();
        let id = ada.id().unwrap();

        assert!(matches!(
            service.update(id, &input("Ada!", it)),
            Err(InventoryError::Validation(_))
        ));
        assert_eq!(service.get_by_id(id).unwrap().first_name(), "Ada");

        let updated = service.update(id, &input("Augusta", it)).unwrap();
        assert_eq!(updated.first_name(), "Augusta");
    }

    #[test]
    fn test_names_may_contain_digits() {
        let (mut service, it) = setup();
        let id = service.add(&input("Ada", it)).unwrap().id().unwrap();

        let updated = service.update(id, &input("Ada3", it)).unwrap();

        assert_eq!(updated.first_name(), "Ada3");
        assert_eq!(service.get_by_id(id).unwrap().first_name(), "Ada3");
    }

    #[test]
    fn test_update_unknown_employee_is_not_found() {
        let (mut service, it) = setup();
        assert!(matches!(
            service.update(EmployeeId::new(99), &input("Ada", it)),
            Err(InventoryError::NotFound {
                entity: EntityKind::Employee,
                id: 99
            })
        ));
    }

    #[test]
    fn test_delete() {
        let (mut service, it) = setup();
        let id = service.add(&input("Ada", it)).unwrap().id().unwrap();

        service.delete(id).unwrap();

        assert!(matches!(
            service.get_by_id(id),
            Err(InventoryError::NotFound { .. })
        ));
        assert!(service.delete(id).is_err());
    }
}
