//! Store ports consumed by the services, and their SQLite implementation.
//!
//! Each operation touches a single record (or a read-only scan) and takes
//! exactly one pooled connection for its duration.

use anyhow::Result;
use murmur_types::models::{Account, AccountId, Message, MessageId};
use tracing::warn;

use crate::{Database, queries};

pub trait AccountStore: Send + Sync {
    /// Persist a new account. `Ok(None)` means the username is already taken;
    /// this is the authoritative uniqueness check, not the lookup.
    fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>>;

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Exact match on both fields. The password is compared byte-for-byte.
    fn find_account_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>>;

    fn find_account_by_id(&self, account_id: AccountId) -> Result<Option<Account>>;
}

pub trait MessageStore: Send + Sync {
    fn insert_message(&self, posted_by: AccountId, message_text: &str, time_posted_epoch: i64) -> Result<Message>;

    fn all_messages(&self) -> Result<Vec<Message>>;

    fn find_message_by_id(&self, message_id: MessageId) -> Result<Option<Message>>;

    /// Returns the updated record, or `None` if the message does not exist.
    fn update_message_text(&self, message_id: MessageId, message_text: &str) -> Result<Option<Message>>;

    /// Returns the record as it was before deletion, or `None` if it did not exist.
    fn delete_message(&self, message_id: MessageId) -> Result<Option<Message>>;

    fn messages_by_account(&self, account_id: AccountId) -> Result<Vec<Message>>;
}

impl AccountStore for Database {
    fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let row = self.with_writer(|conn| queries::insert_account(conn, username, password))?;
        if row.is_none() {
            warn!("Username '{}' rejected by uniqueness constraint", username);
        }
        Ok(row.map(Account::from))
    }

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row = self.with_reader(|conn| queries::account_by_username(conn, username))?;
        Ok(row.map(Account::from))
    }

    fn find_account_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let row = self.with_reader(|conn| queries::account_by_credentials(conn, username, password))?;
        Ok(row.map(Account::from))
    }

    fn find_account_by_id(&self, account_id: AccountId) -> Result<Option<Account>> {
        let row = self.with_reader(|conn| queries::account_by_id(conn, account_id))?;
        Ok(row.map(Account::from))
    }
}

impl MessageStore for Database {
    fn insert_message(&self, posted_by: AccountId, message_text: &str, time_posted_epoch: i64) -> Result<Message> {
        let row = self.with_writer(|conn| {
            queries::insert_message(conn, posted_by, message_text, time_posted_epoch)
        })?;
        Ok(row.into())
    }

    fn all_messages(&self) -> Result<Vec<Message>> {
        let rows = self.with_reader(queries::all_messages)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    fn find_message_by_id(&self, message_id: MessageId) -> Result<Option<Message>> {
        let row = self.with_reader(|conn| queries::message_by_id(conn, message_id))?;
        Ok(row.map(Message::from))
    }

    fn update_message_text(&self, message_id: MessageId, message_text: &str) -> Result<Option<Message>> {
        let row = self.with_writer(|conn| queries::update_message_text(conn, message_id, message_text))?;
        Ok(row.map(Message::from))
    }

    fn delete_message(&self, message_id: MessageId) -> Result<Option<Message>> {
        let row = self.with_writer(|conn| queries::delete_message(conn, message_id))?;
        Ok(row.map(Message::from))
    }

    fn messages_by_account(&self, account_id: AccountId) -> Result<Vec<Message>> {
        let rows = self.with_reader(|conn| queries::messages_by_account(conn, account_id))?;
        Ok(rows.into_iter().map(Message::from).collect())
    }
}
