//! Account Repository - Abstract persistence for Accounts
//!
//! Email lookups compare the stored (trimmed) address exactly.

use crate::model::account::Account;
use crate::model::ids::{AccountId, EmployeeId};
use crate::repository::RepositoryError;

pub trait AccountRepository {
    /// Store a new account and return it with its assigned id
    fn insert_account(&mut self, account: Account) -> Result<Account, RepositoryError>;

    /// Overwrite the stored account with the same id
    fn update_account(&mut self, account: &Account) -> Result<(), RepositoryError>;

    fn delete_account(&mut self, id: AccountId) -> Result<(), RepositoryError>;

    fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;

    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;

    /// The account bound to an employee, if any
    fn find_account_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Account>, RepositoryError>;

    /// All accounts, ordered by id
    fn list_accounts(&self) -> Result<Vec<Account>, RepositoryError>;
}
