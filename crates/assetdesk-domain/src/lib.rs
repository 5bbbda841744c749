//! # AssetDesk Domain Layer
//!
//! Entity validation and relationship integrity for the asset inventory.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  validation  - Field rules (length, character class, range) ││
//! │  │  model/      - Entities with validating constructors        ││
//! │  │  repository/ - Persistence Gateway traits (ports)           ││
//! │  │  service/    - LinkResolver, AdminPolicy                    ││
//! │  │  error       - InventoryError and its kinds                 ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here performs I/O. Storage arrives through the repository
//! traits; hashing and sessions live in `assetdesk-usecase`.

pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{
    EntityKind, FieldValidationError, InventoryError, RelationshipPreconditionError,
    ValidationFailure,
};

pub use model::{
    account::{Account, PasswordHash},
    department::Department,
    employee::{Employee, EmployeeInput},
    hardware_asset::{HardwareAsset, HardwareAssetInput, SoftwareLink},
    ids::{AccountId, DepartmentId, EmployeeId, HardwareAssetId, SoftwareAssetId, IT_DEPARTMENT_ID},
    software_asset::{SoftwareAsset, SoftwareKey},
};

pub use repository::{
    AccountRepository, DepartmentRepository, EmployeeRepository, HardwareAssetRepository,
    RepositoryError, SoftwareAssetRepository, UnitOfWork,
};

pub use service::{
    admin_policy::AdminPolicy,
    link_resolver::{LinkOutcome, LinkResolver, Resolution, SoftwareInstallation},
};
