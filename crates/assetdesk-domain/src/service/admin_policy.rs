//! Admin Policy - Who may hold an administrator account
//!
//! An account becomes an administrator only through [`AdminPolicy::promote`].
//! Promotion requires the account to be bound to an employee, and that
//! employee must work in the admin department. Both failures are
//! relationship preconditions, not field validation errors.
//!
//! There is no demotion. Revoking admin status is not supported.

use crate::error::RelationshipPreconditionError;
use crate::model::account::Account;
use crate::model::employee::Employee;
use crate::model::ids::{DepartmentId, IT_DEPARTMENT_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminPolicy {
    admin_department: DepartmentId,
}

impl AdminPolicy {
    pub fn new(admin_department: DepartmentId) -> Self {
        Self { admin_department }
    }

    pub fn admin_department(&self) -> DepartmentId {
        self.admin_department
    }

    /// Whether an employee's department allows an admin account
    pub fn is_eligible(&self, employee: &Employee) -> bool {
        employee.department_id() == self.admin_department
    }

    /// Raise the administrator flag on `account`
    ///
    /// `employee` is the record the account is bound to, as loaded by the
    /// caller. Passing `None`, or an employee other than the bound one, means
    /// the account has no employee.
    pub fn promote(
        &self,
        account: &mut Account,
        employee: Option<&Employee>,
    ) -> Result<(), RelationshipPreconditionError> {
        let (bound, employee) = match (account.employee_id(), employee) {
            (Some(bound), Some(employee)) if employee.id() == Some(bound) => (bound, employee),
            _ => {
                return Err(RelationshipPreconditionError::AccountWithoutEmployee {
                    account: account.id(),
                })
            }
        };

        if !self.is_eligible(employee) {
            return Err(RelationshipPreconditionError::NotInAdminDepartment {
                employee: bound,
            });
        }

        account.grant_admin();
        Ok(())
    }
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self::new(IT_DEPARTMENT_ID)
    }
}
