//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from assetdesk-domain.

pub mod file_system;
pub mod in_memory;
