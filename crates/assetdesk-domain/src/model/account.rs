//! Account - The credentials a user signs in with
//!
//! The password is only ever held as a salted hash. An account may be bound
//! to one employee; the administrator flag can only be raised through
//! [`crate::service::admin_policy::AdminPolicy::promote`], which checks
//! that binding.

use serde::{Deserialize, Serialize};

use super::ids::{AccountId, EmployeeId};
use crate::error::FieldValidationError;
use crate::validation;

/// A PHC-formatted password hash
///
/// `Debug` output is redacted so a hash never ends up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: Option<AccountId>,
    email: String,
    password_hash: PasswordHash,
    employee_id: Option<EmployeeId>,
    is_admin: bool,
}

impl Account {
    /// Create a new, not yet persisted, non-admin Account
    pub fn new(email: &str, password_hash: PasswordHash) -> Result<Self, FieldValidationError> {
        Ok(Self {
            id: None,
            email: validation::email(email)?,
            password_hash,
            employee_id: None,
            is_admin: false,
        })
    }

    /// Builder: attach the identity assigned by storage
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder: bind an employee
    pub fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    // ========== Mutations ==========

    pub fn set_email(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.email = validation::email(raw)?;
        Ok(())
    }

    pub fn set_password_hash(&mut self, hash: PasswordHash) {
        self.password_hash = hash;
    }

    pub fn bind_employee(&mut self, employee_id: EmployeeId) {
        self.employee_id = Some(employee_id);
    }

    pub(crate) fn grant_admin(&mut self) {
        self.is_admin = true;
    }
}
