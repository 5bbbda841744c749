//! # AssetDesk Use Case Layer
//!
//! Application services over the domain. Each service validates its input,
//! checks relationship preconditions, then runs its writes in one
//! transaction of the Persistence Gateway.
//!
//! Authentication (Argon2id password hashing and the signed-in [`Session`])
//! and runtime configuration live here as well.

pub mod auth;
pub mod config;
pub mod service;

pub use assetdesk_domain;

pub use auth::Session;
pub use config::{ConfigError, InventoryConfig};
pub use service::{
    AccountService, DepartmentService, EmployeeService, HardwareAssetService, SoftwareAssetService,
    SoftwareChange,
};
