//! Employee Repository - Abstract persistence for Employees

use crate::model::employee::Employee;
use crate::model::ids::{DepartmentId, EmployeeId};
use crate::repository::RepositoryError;

pub trait EmployeeRepository {
    /// Store a new employee and return it with its assigned id
    fn insert_employee(&mut self, employee: Employee) -> Result<Employee, RepositoryError>;

    /// Overwrite the stored employee with the same id
    fn update_employee(&mut self, employee: &Employee) -> Result<(), RepositoryError>;

    fn delete_employee(&mut self, id: EmployeeId) -> Result<(), RepositoryError>;

    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    /// Employees of one department, ordered by id
    fn employees_in_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Employee>, RepositoryError>;
}
