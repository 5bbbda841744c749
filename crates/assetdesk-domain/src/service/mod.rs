//! Domain Services
//!
//! Pure logic that spans more than one entity. No I/O beyond the repository
//! ports they are handed.

pub mod admin_policy;
pub mod link_resolver;
