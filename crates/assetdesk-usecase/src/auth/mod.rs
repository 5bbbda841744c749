//! Authentication: password hashing and the signed-in session

pub mod password;
pub mod session;

pub use password::{hash_password, validate_password_strength, verify_password};
pub use session::Session;
