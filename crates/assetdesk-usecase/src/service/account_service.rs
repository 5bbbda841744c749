//! Account Service
//!
//! Accounts are the login identities. Passwords are hashed before anything
//! is stored and never leave this module in clear text. An account is bound
//! to at most one employee and each employee has at most one account.

use tracing::{debug, info, warn};

use assetdesk_domain::error::{
    EntityKind, InventoryError, RelationshipPreconditionError, Result,
};
use assetdesk_domain::model::account::Account;
use assetdesk_domain::model::ids::{AccountId, EmployeeId};
use assetdesk_domain::repository::UnitOfWork;
use assetdesk_domain::service::admin_policy::AdminPolicy;
use assetdesk_domain::validation;

use super::found;
use crate::auth::password::{
    hash_password, prepare_dummy_hash, validate_password_strength, verify_against_dummy,
    verify_password,
};
use crate::auth::session::Session;
use crate::config::InventoryConfig;

pub struct AccountService<S> {
    store: S,
    policy: AdminPolicy,
    min_password_length: usize,
}

impl<S: UnitOfWork> AccountService<S> {
    pub fn new(store: S, config: &InventoryConfig) -> Self {
        prepare_dummy_hash();
        Self {
            store,
            policy: config.admin_policy(),
            min_password_length: config.min_password_length,
        }
    }

    /// Register a new, unbound, non-admin account
    pub fn add(&mut self, email: &str, password: &str) -> Result<Account> {
        let email = validation::email(email)?;
        validate_password_strength(password, self.min_password_length)?;
        let account = Account::new(&email, hash_password(password)?)?;

        let stored = self.store.transaction(|tx| -> Result<Account> {
            if tx.find_account_by_email(account.email())?.is_some() {
                return Err(InventoryError::duplicate(EntityKind::Account, account.email()));
            }
            Ok(tx.insert_account(account)?)
        })?;
        info!(account_id = ?stored.id(), "account added");
        Ok(stored)
    }

    pub fn get_by_id(&self, id: AccountId) -> Result<Account> {
        found(self.store.find_account(id)?, EntityKind::Account, id.get())
    }

    pub fn get_all(&self) -> Result<Vec<Account>> {
        Ok(self.store.list_accounts()?)
    }

    /// Change the login email of an account
    pub fn update(&mut self, id: AccountId, email: &str) -> Result<Account> {
        let email = validation::email(email)?;
        self.store.transaction(|tx| -> Result<Account> {
            let mut account = found(tx.find_account(id)?, EntityKind::Account, id.get())?;
            if let Some(other) = tx.find_account_by_email(&email)? {
                if other.id() != Some(id) {
                    return Err(InventoryError::duplicate(EntityKind::Account, email.as_str()));
                }
            }
            account.set_email(&email)?;
            tx.update_account(&account)?;
            info!(account_id = %id, "account email changed");
            Ok(account)
        })
    }

    pub fn delete(&mut self, id: AccountId) -> Result<()> {
        self.store.transaction(|tx| -> Result<()> {
            found(tx.find_account(id)?, EntityKind::Account, id.get())?;
            tx.delete_account(id)?;
            Ok(())
        })?;
        info!(account_id = %id, "account deleted");
        Ok(())
    }

    /// Look up an account by email and check its password
    ///
    /// Unknown email and wrong password fail the same way.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account> {
        let account = self.store.find_account_by_email(email.trim())?;
        match account {
            Some(account) if verify_password(password, account.password_hash()) => {
                debug!(account_id = ?account.id(), "authenticated");
                Ok(account)
            }
            Some(account) => {
                warn!(account_id = ?account.id(), "authentication failed");
                Err(InventoryError::AuthenticationFailed)
            }
            None => {
                verify_against_dummy(password);
                warn!("authentication failed for unknown email");
                Err(InventoryError::AuthenticationFailed)
            }
        }
    }

    /// Authenticate and make the account the session's current account
    pub fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<Account> {
        let account = self.authenticate(email, password)?;
        session.sign_in(account.clone());
        info!(account_id = ?account.id(), admin = account.is_admin(), "signed in");
        Ok(account)
    }

    /// Replace the password after checking the current one
    pub fn change_password(&mut self, id: AccountId, current: &str, new: &str) -> Result<()> {
        validate_password_strength(new, self.min_password_length)?;
        let mut account = self.get_by_id(id)?;
        if !verify_password(current, account.password_hash()) {
            warn!(account_id = %id, "password change with wrong current password");
            return Err(InventoryError::AuthenticationFailed);
        }
        account.set_password_hash(hash_password(new)?);

        self.store
            .transaction(|tx| -> Result<()> { Ok(tx.update_account(&account)?) })?;
        info!(account_id = %id, "password changed");
        Ok(())
    }

    /// Bind an account to the employee it belongs to
    pub fn bind_employee(&mut self, id: AccountId, employee_id: EmployeeId) -> Result<Account> {
        let policy = self.policy;
        self.store.transaction(|tx| -> Result<Account> {
            let mut account = found(tx.find_account(id)?, EntityKind::Account, id.get())?;
            let employee = tx
                .find_employee(employee_id)?
                .ok_or(RelationshipPreconditionError::MissingEmployee(employee_id))?;

            if let Some(other) = tx.find_account_by_employee(employee_id)? {
                if other.id() != Some(id) {
                    return Err(InventoryError::duplicate(
                        EntityKind::Account,
                        format!("account for employee {}", employee_id),
                    ));
                }
            }
            if account.is_admin() && !policy.is_eligible(&employee) {
                return Err(RelationshipPreconditionError::NotInAdminDepartment {
                    employee: employee_id,
                }
                .into());
            }

            account.bind_employee(employee_id);
            tx.update_account(&account)?;
            info!(account_id = %id, employee_id = %employee_id, "account bound to employee");
            Ok(account)
        })
    }

    /// Grant administrator rights to an account
    ///
    /// The account must be bound to an employee of the admin department.
    /// A signed-in session holding the account sees the change.
    pub fn promote_to_admin(
        &mut self,
        id: AccountId,
        session: Option<&mut Session>,
    ) -> Result<Account> {
        let policy = self.policy;
        let account = self.store.transaction(|tx| -> Result<Account> {
            let mut account = found(tx.find_account(id)?, EntityKind::Account, id.get())?;
            let employee = match account.employee_id() {
                Some(employee_id) => tx.find_employee(employee_id)?,
                None => None,
            };

            if let Err(err) = policy.promote(&mut account, employee.as_ref()) {
                warn!(account_id = %id, error = %err, "promotion rejected");
                return Err(err.into());
            }
            tx.update_account(&account)?;
            Ok(account)
        })?;

        if let Some(session) = session {
            session.refresh(&account);
        }
        info!(account_id = %id, "account promoted to admin");
        Ok(account)
    }

    /// Drop the signed-in account if it was deleted underneath the session
    pub fn validate_session(&self, session: &mut Session) -> Result<()> {
        let Some(id) = session.current().and_then(Account::id) else {
            return Ok(());
        };
        match self.store.find_account(id)? {
            Some(account) => session.refresh(&account),
            None => {
                debug!(account_id = %id, "session account no longer exists");
                session.logout();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_adapter::InMemoryStore;

    fn service() -> AccountService<InMemoryStore> {
        AccountService::new(InMemoryStore::new(), &InventoryConfig::default())
    }

    #[test]
    fn test_add_hashes_password() {
        let mut service = service();

        let account = service.add("ada@example.com", "correct horse").unwrap();

        assert!(!account.is_admin());
        assert!(account.employee_id().is_none());
        assert_ne!(account.password_hash().as_str(), "correct horse");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut service = service();
        service.add("ada@example.com", "correct horse").unwrap();

        let err = service.add(" ada@example.com ", "another pass").unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Duplicate {
                entity: EntityKind::Account,
                ..
            }
        ));
        assert_eq!(service.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_dummy_hash_ready_before_first_login() {
        let _service = service();
        assert!(crate::auth::password::dummy_hash_ready());
    }

    #[test]
    fn test_update_email() {
        let mut service = service();
        let id = service
            .add("ada@example.com", "correct horse")
            .unwrap()
            .id()
            .unwrap();

        let updated = service.update(id, " ada.l@example.com ").unwrap();

        assert_eq!(updated.email(), "ada.l@example.com");
        assert!(service
            .authenticate("ada.l@example.com", "correct horse")
            .is_ok());
    }

    #[test]
    fn test_update_to_taken_email_rejected() {
        let mut service = service();
        let ada = service
            .add("ada@example.com", "correct horse")
            .unwrap()
            .id()
            .unwrap();
        service.add("bob@example.com", "correct horse").unwrap();

        let err = service.update(ada, "bob@example.com").unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Duplicate {
                entity: EntityKind::Account,
                ..
            }
        ));
        assert_eq!(service.get_by_id(ada).unwrap().email(), "ada@example.com");
        // Keeping its own email is not a conflict
        assert!(service.update(ada, "ada@example.com").is_ok());
    }

    #[test]
    fn test_update_unknown_account_is_not_found() {
        let mut service = service();
        assert!(matches!(
            service.update(AccountId::new(99), "ada@example.com"),
            Err(InventoryError::NotFound {
                entity: EntityKind::Account,
                id: 99
            })
        ));
    }

    #[test]
    fn test_short_password_rejected() {
        let mut service = service();
        let err = service.add("ada@example.com", "short").unwrap_err();
        assert!(matches!(err, InventoryError::Validation(e) if e.field == "password"));
    }

    #[test]
    fn test_authenticate() {
        let mut service = service();
        service.add("ada@example.com", "correct horse").unwrap();

        assert!(service.authenticate("ada@example.com", "correct horse").is_ok());
        assert!(matches!(
            service.authenticate("ada@example.com", "wrong horse"),
            Err(InventoryError::AuthenticationFailed)
        ));
        assert!(matches!(
            service.authenticate("bob@example.com", "correct horse"),
            Err(InventoryError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_change_password() {
        let mut service = service();
        let id = service
            .add("ada@example.com", "correct horse")
            .unwrap()
            .id()
            .unwrap();

        assert!(service.change_password(id, "wrong horse", "battery staple").is_err());
        service
            .change_password(id, "correct horse", "battery staple")
            .unwrap();

        assert!(service.authenticate("ada@example.com", "correct horse").is_err());
        assert!(service.authenticate("ada@example.com", "battery staple").is_ok());
    }

    #[test]
    fn test_promote_unbound_account_fails() {
        let mut service = service();
        let id = service
            .add("ada@example.com", "correct horse")
            .unwrap()
            .id()
            .unwrap();

        let err = service.promote_to_admin(id, None).unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Precondition(
                RelationshipPreconditionError::AccountWithoutEmployee { .. }
            )
        ));
        assert!(!service.get_by_id(id).unwrap().is_admin());
    }

    #[test]
    fn test_login_and_logout() {
        let mut service = service();
        service.add("ada@example.com", "correct horse").unwrap();
        let mut session = Session::new();

        assert!(service
            .login(&mut session, "ada@example.com", "nope nope")
            .is_err());
        assert!(!session.is_authenticated());

        service
            .login(&mut session, "ada@example.com", "correct horse")
            .unwrap();
        assert!(session.is_authenticated());
        assert!(!session.is_admin());

        session.logout();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_deleted_account_ends_session() {
        let mut service = service();
        let id = service
            .add("ada@example.com", "correct horse")
            .unwrap()
            .id()
            .unwrap();
        let mut session = Session::new();
        service
            .login(&mut session, "ada@example.com", "correct horse")
            .unwrap();

        service.delete(id).unwrap();
        service.validate_session(&mut session).unwrap();

        assert!(!session.is_authenticated());
    }
}
