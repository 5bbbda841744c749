//! Session - The account currently signed in
//!
//! A session only ever holds an account that passed authentication; the
//! sign-in path lives in `AccountService::login`.

use assetdesk_domain::model::account::Account;

#[derive(Debug, Clone, Default)]
pub struct Session {
    account: Option<Account>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sign_in(&mut self, account: Account) {
        self.account = Some(account);
    }

    /// Forget the signed-in account
    pub fn logout(&mut self) {
        self.account = None;
    }

    pub fn current(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.account.as_ref().is_some_and(Account::is_admin)
    }

    /// Pick up changes to the signed-in account, such as a promotion
    pub(crate) fn refresh(&mut self, account: &Account) {
        if let Some(current) = &mut self.account {
            if current.id().is_some() && current.id() == account.id() {
                *current = account.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_domain::model::account::PasswordHash;
    use assetdesk_domain::model::ids::AccountId;

    fn account(id: u64) -> Account {
        Account::new("ada@example.com", PasswordHash::from_phc("$argon2id$stub"))
            .unwrap()
            .with_id(AccountId::new(id))
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_logout_clears_account() {
        let mut session = Session::new();
        session.sign_in(account(1));
        assert_eq!(session.current().unwrap().id(), Some(AccountId::new(1)));

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_refresh_ignores_other_accounts() {
        let mut session = Session::new();
        session.sign_in(account(1));

        let other = account(2);
        session.refresh(&other);

        assert_eq!(session.current().unwrap().id(), Some(AccountId::new(1)));
    }
}
