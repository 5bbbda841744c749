//! Department - An organizational unit that employees belong to
//!
//! Departments are created by an administrator and referenced by employees.
//! There is no delete path.

use serde::{Deserialize, Serialize};

use super::ids::DepartmentId;
use crate::error::FieldValidationError;
use crate::validation::TextRule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: Option<DepartmentId>,
    name: String,
}

impl Department {
    /// Create a new, not yet persisted Department
    pub fn new(name: &str) -> Result<Self, FieldValidationError> {
        Ok(Self {
            id: None,
            name: TextRule::DepartmentName.apply("department name", name)?,
        })
    }

    /// Builder: attach the identity assigned by storage
    pub fn with_id(mut self, id: DepartmentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the department; on failure the current name is kept
    pub fn rename(&mut self, name: &str) -> Result<(), FieldValidationError> {
        self.name = TextRule::DepartmentName.apply("department name", name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;

    #[test]
    fn test_department_creation() {
        let department = Department::new("  Information Technology ").unwrap();
        assert_eq!(department.name(), "Information Technology");
        assert_eq!(department.id(), None);

        let stored = department.with_id(DepartmentId::new(1));
        assert_eq!(stored.id(), Some(DepartmentId::new(1)));
    }

    #[test]
    fn test_rejected_name_leaves_no_department() {
        let err = Department::new("I.T.").unwrap_err();
        assert_eq!(err.reason, ValidationFailure::InvalidCharacter('.'));
    }

    #[test]
    fn test_failed_rename_keeps_previous_name() {
        let mut department = Department::new("IT").unwrap();

        assert!(department.rename("I.T.").is_err());
        assert_eq!(department.name(), "IT");

        department.rename("Information Technology").unwrap();
        assert_eq!(department.name(), "Information Technology");
    }
}
