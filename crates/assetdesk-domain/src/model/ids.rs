//! Typed identities
//!
//! Identities are assigned by the persistence gateway on insert. A value
//! built in memory carries no id until it has been stored.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a Department
    DepartmentId
);
entity_id!(
    /// Unique identifier for an Employee
    EmployeeId
);
entity_id!(
    /// Unique identifier for an Account
    AccountId
);
entity_id!(
    /// Unique identifier for a HardwareAsset
    HardwareAssetId
);
entity_id!(
    /// Unique identifier for a SoftwareAsset
    SoftwareAssetId
);

/// The reserved identifier of the IT department, whose employees may hold
/// administrator accounts
pub const IT_DEPARTMENT_ID: DepartmentId = DepartmentId::new(1);
