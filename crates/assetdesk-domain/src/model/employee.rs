//! Employee - A person who holds hardware and may own an account
//!
//! An Employee always belongs to exactly one Department. The department is
//! held by id; whether that id exists is checked by the service before the
//! employee is stored.

use serde::{Deserialize, Serialize};

use super::ids::{DepartmentId, EmployeeId};
use crate::error::FieldValidationError;
use crate::validation::{self, TextRule};

/// Raw employee fields as entered by a user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: Option<EmployeeId>,
    first_name: String,
    last_name: String,
    email: String,
    department_id: DepartmentId,
}

impl Employee {
    /// Create a new, not yet persisted Employee
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        department_id: DepartmentId,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            id: None,
            first_name: TextRule::PersonName.apply("first name", first_name)?,
            last_name: TextRule::PersonName.apply("last name", last_name)?,
            email: validation::email(email)?,
            department_id,
        })
    }

    pub fn from_input(input: &EmployeeInput) -> Result<Self, FieldValidationError> {
        Self::new(
            &input.first_name,
            &input.last_name,
            &input.email,
            input.department_id,
        )
    }

    /// Builder: attach the identity assigned by storage
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    // ========== Mutations ==========

    pub fn set_first_name(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.first_name = TextRule::PersonName.apply("first name", raw)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.last_name = TextRule::PersonName.apply("last name", raw)?;
        Ok(())
    }

    pub fn set_email(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.email = validation::email(raw)?;
        Ok(())
    }

    pub fn move_to_department(&mut self, department_id: DepartmentId) {
        self.department_id = department_id;
    }

    /// Replace every editable field at once
    ///
    /// All fields are validated before any is assigned, so a rejected input
    /// leaves the employee exactly as it was.
    pub fn apply_input(&mut self, input: &EmployeeInput) -> Result<(), FieldValidationError> {
        let candidate = Self::from_input(input)?;
        self.first_name = candidate.first_name;
        self.last_name = candidate.last_name;
        self.email = candidate.email;
        self.department_id = candidate.department_id;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(first: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: first.to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            department_id: DepartmentId::new(1),
        }
    }

    #[test]
    fn test_employee_creation() {
        let employee = Employee::from_input(&input("Ada")).unwrap();

        assert_eq!(employee.full_name(), "Ada Lovelace");
        assert_eq!(employee.email(), "ada@example.com");
        assert_eq!(employee.department_id(), DepartmentId::new(1));
    }

    #[test]
    fn test_names_allow_period_and_hyphen() {
        let employee = Employee::new("J.R.", "Smith-Jones", "jr@example.com", DepartmentId::new(2));
        assert!(employee.is_ok());
    }

    #[test]
    fn test_invalid_name_rejected() {
        let err = Employee::from_input(&input("Ada!")).unwrap_err();
        assert_eq!(err.field, "first name");

        let err =
            Employee::new("Ada", "Lovelace", "not-an-email", DepartmentId::new(1)).unwrap_err();
        assert_eq!(err.field, "email");
    }

    #[test]
    fn test_apply_input_is_all_or_nothing() {
        let mut employee = Employee::from_input(&input("Ada")).unwrap();

        let mut bad = input("Augusta");
        bad.email = "broken".to_string();
        bad.department_id = DepartmentId::new(9);

        assert!(employee.apply_input(&bad).is_err());
        assert_eq!(employee.first_name(), "Ada");
        assert_eq!(employee.department_id(), DepartmentId::new(1));
    }
}
