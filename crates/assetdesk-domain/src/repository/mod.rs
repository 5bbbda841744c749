//! Repository Traits - The Persistence Gateway as seen by the domain
//!
//! These traits define what the services need from storage, not how it is
//! done. One store implements all of them plus [`UnitOfWork`], so a single
//! transaction can span several entity kinds.
//!
//! ```text
//! Domain Layer              │  Adapter Layer
//! ──────────────────────────┼────────────────────────
//! trait HardwareAssetRepo   │  InMemoryStore
//!   fn insert_hardware()    │    (+ JSON snapshot file)
//!   fn find_hardware()      │
//! trait UnitOfWork          │
//!   fn transaction()        │
//! ```
//!
//! Method names carry the entity so a store implementing every trait can be
//! called without disambiguation.

pub mod account_repository;
pub mod department_repository;
pub mod employee_repository;
pub mod hardware_repository;
pub mod software_repository;

use thiserror::Error;

use crate::error::EntityKind;

pub use account_repository::AccountRepository;
pub use department_repository::DepartmentRepository;
pub use employee_repository::EmployeeRepository;
pub use hardware_repository::HardwareAssetRepository;
pub use software_repository::SoftwareAssetRepository;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Update or delete addressed an id that is not stored
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: u64 },

    /// A storage-level uniqueness constraint rejected the write
    #[error("{entity} violates a unique constraint: {key}")]
    UniqueViolation { entity: EntityKind, key: String },

    /// The entity handed to update/delete has never been stored
    #[error("{entity} has no identity yet")]
    MissingIdentity { entity: EntityKind },

    /// Failed to persist
    #[error("Persistence error: {message}")]
    Persistence { message: String },
}

/// A store that can run several repository calls atomically
///
/// `transaction` runs `work` against the store. If `work` returns `Ok`, every
/// write it made is committed; if it returns `Err`, none of them is visible
/// afterwards. The store is released on both paths.
pub trait UnitOfWork:
    DepartmentRepository
    + EmployeeRepository
    + AccountRepository
    + HardwareAssetRepository
    + SoftwareAssetRepository
{
    fn transaction<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<RepositoryError>;
}
