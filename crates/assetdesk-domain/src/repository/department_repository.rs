//! Department Repository - Abstract persistence for Departments

use crate::model::department::Department;
use crate::model::ids::DepartmentId;
use crate::repository::RepositoryError;

pub trait DepartmentRepository {
    /// Store a new department and return it with its assigned id
    fn insert_department(&mut self, department: Department) -> Result<Department, RepositoryError>;

    /// Overwrite the stored department with the same id
    fn update_department(&mut self, department: &Department) -> Result<(), RepositoryError>;

    fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError>;

    /// All departments, ordered by id
    fn list_departments(&self) -> Result<Vec<Department>, RepositoryError>;

    fn department_exists(&self, id: DepartmentId) -> Result<bool, RepositoryError> {
        Ok(self.find_department(id)?.is_some())
    }
}
