//! Domain Models - The vocabulary of AssetDesk
//!
//! Entities are built through constructors that return `Result`, and every
//! mutator validates before it assigns. An entity value that exists is an
//! entity value that passed its field rules.
//!
//! Relationships are held as ids. Writing an employee never re-serializes
//! its department; writing a hardware asset never touches its software.

pub mod account;
pub mod department;
pub mod employee;
pub mod hardware_asset;
pub mod ids;
pub mod software_asset;
