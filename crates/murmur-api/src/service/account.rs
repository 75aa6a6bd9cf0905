use std::sync::Arc;

use murmur_db::AccountStore;
use murmur_types::api::AccountRequest;
use murmur_types::models::{Account, AccountId};
use tracing::debug;

use crate::error::{Rejection, ServiceResult};
use crate::validation;

/// Registration, login and the account existence check used by messages.
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S: AccountStore> AccountService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new account under the trimmed username.
    ///
    /// The username lookup is only a fast path. Two concurrent registrations
    /// can both miss it; the store's uniqueness constraint then rejects the
    /// second insert and that is reported as [`Rejection::UsernameTaken`] too.
    pub fn register(&self, candidate: &AccountRequest) -> ServiceResult<Account> {
        let username = validation::username(candidate.username.as_deref())?;
        let password = validation::new_password(candidate.password.as_deref())?;

        if self.store.find_account_by_username(username)?.is_some() {
            return Err(Rejection::UsernameTaken.into());
        }

        let account = self
            .store
            .insert_account(username, password)?
            .ok_or(Rejection::UsernameTaken)?;

        debug!("Registered account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    pub fn login(&self, credentials: &AccountRequest) -> ServiceResult<Account> {
        let username = validation::username(credentials.username.as_deref())?;
        let password = credentials
            .password
            .as_deref()
            .ok_or(Rejection::MissingPassword)?;

        let account = self
            .store
            .find_account_by_credentials(username, password)?
            .ok_or(Rejection::BadCredentials)?;
        Ok(account)
    }

    pub fn account_exists(&self, account_id: AccountId) -> ServiceResult<bool> {
        Ok(self.store.find_account_by_id(account_id)?.is_some())
    }
}
