//! Error types for AssetDesk
//!
//! Every service operation fails with an [`InventoryError`]. The variants map
//! one-to-one onto the failure kinds the view layer distinguishes: bad input,
//! missing relationship, duplicate, unknown id, storage failure.

use thiserror::Error;

use crate::model::ids::{AccountId, DepartmentId, EmployeeId, HardwareAssetId};
use crate::repository::RepositoryError;

/// The kinds of entity AssetDesk persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Employee,
    Account,
    HardwareAsset,
    SoftwareAsset,
}

impl EntityKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Department => "Department",
            EntityKind::Employee => "Employee",
            EntityKind::Account => "Account",
            EntityKind::HardwareAsset => "Hardware asset",
            EntityKind::SoftwareAsset => "Software asset",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Why a field value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("value is empty")]
    Empty,

    #[error("value is {actual} characters long, at most {max} allowed")]
    TooLong { max: usize, actual: usize },

    #[error("value is {actual} characters long, at least {min} required")]
    TooShort { min: usize, actual: usize },

    #[error("character {0:?} is not allowed")]
    InvalidCharacter(char),

    #[error("value is not well formed")]
    InvalidFormat,

    #[error("value is outside the accepted range")]
    OutOfRange,
}

/// A field value failed its length, character or range predicate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct FieldValidationError {
    pub field: &'static str,
    pub reason: ValidationFailure,
}

impl FieldValidationError {
    pub fn new(field: &'static str, reason: ValidationFailure) -> Self {
        Self { field, reason }
    }
}

/// A required association is absent
///
/// Distinct from [`FieldValidationError`]: the input values are fine, but the
/// entity they describe cannot exist without something it points at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationshipPreconditionError {
    #[error("Account has no employee bound to it")]
    AccountWithoutEmployee { account: Option<AccountId> },

    #[error("Employee {employee} does not belong to the admin department")]
    NotInAdminDepartment { employee: EmployeeId },

    #[error("Hardware asset has no employee assigned")]
    HardwareWithoutEmployee,

    #[error("Department {0} does not exist")]
    MissingDepartment(DepartmentId),

    #[error("Employee {0} does not exist")]
    MissingEmployee(EmployeeId),

    #[error("Hardware asset {0} does not exist")]
    MissingHardware(HardwareAssetId),

    #[error("Employee {0} is still referenced by hardware or an account")]
    EmployeeInUse(EmployeeId),
}

/// General AssetDesk error type
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Validation(#[from] FieldValidationError),

    #[error(transparent)]
    Precondition(#[from] RelationshipPreconditionError),

    #[error("{entity} already exists: {key}")]
    Duplicate { entity: EntityKind, key: String },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    #[error("Persistence error: {0}")]
    Persistence(RepositoryError),

    #[error("Invalid email or password")]
    AuthenticationFailed,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl InventoryError {
    pub fn not_found(entity: EntityKind, id: u64) -> Self {
        InventoryError::NotFound { entity, id }
    }

    pub fn duplicate(entity: EntityKind, key: impl Into<String>) -> Self {
        InventoryError::Duplicate {
            entity,
            key: key.into(),
        }
    }
}

impl From<RepositoryError> for InventoryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => InventoryError::NotFound { entity, id },
            RepositoryError::UniqueViolation { entity, key } => {
                InventoryError::Duplicate { entity, key }
            }
            other => InventoryError::Persistence(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_becomes_not_found() {
        let err: InventoryError = RepositoryError::NotFound {
            entity: EntityKind::Employee,
            id: 7,
        }
        .into();

        assert!(matches!(
            err,
            InventoryError::NotFound {
                entity: EntityKind::Employee,
                id: 7
            }
        ));
        assert_eq!(err.to_string(), "Employee with id 7 not found");
    }

    #[test]
    fn test_storage_failure_passes_through() {
        let err: InventoryError = RepositoryError::Persistence {
            message: "disk full".to_string(),
        }
        .into();

        assert!(matches!(err, InventoryError::Persistence(_)));
    }

    #[test]
    fn test_field_error_message() {
        let err = FieldValidationError::new(
            "notes",
            ValidationFailure::TooLong {
                max: 64,
                actual: 300,
            },
        );
        assert_eq!(
            err.to_string(),
            "Invalid notes: value is 300 characters long, at most 64 allowed"
        );
    }
}
