//! # AssetDesk Adapter Layer
//!
//! Persistence Gateway implementations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `repository/in_memory` - `InMemoryStore`, implements every repository
//!   trait and `UnitOfWork`
//! - `repository/file_system` - JSON snapshot file the store persists to

pub mod repository;

pub use repository::in_memory::InMemoryStore;
