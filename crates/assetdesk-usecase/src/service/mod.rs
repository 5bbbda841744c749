//! Application services
//!
//! One service per entity kind. Every service owns a handle to the
//! Persistence Gateway (any [`UnitOfWork`] store; clones of the in-memory
//! store share tables) and runs each mutation inside one transaction.
//!
//! Validation and precondition checks happen before the first write of a
//! transaction, so a rejected operation leaves storage untouched.

pub mod account_service;
pub mod department_service;
pub mod employee_service;
pub mod hardware_service;
pub mod software_service;

use assetdesk_domain::error::{EntityKind, InventoryError};

pub use account_service::AccountService;
pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;
pub use hardware_service::{HardwareAssetService, SoftwareChange};
pub use software_service::SoftwareAssetService;

/// Turn a lookup miss into a `NotFound` error
pub(crate) fn found<T>(value: Option<T>, entity: EntityKind, id: u64) -> Result<T, InventoryError> {
    value.ok_or(InventoryError::NotFound { entity, id })
}
