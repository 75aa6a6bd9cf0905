use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use murmur_db::{AccountStore, MessageStore};
use murmur_types::models::{Account, AccountId, Message, MessageId};

/// In-memory store for service tests.
#[derive(Default)]
pub struct FakeStore {
    accounts: Mutex<Vec<Account>>,
    messages: Mutex<Vec<Message>>,
    calls: AtomicUsize,
    /// Every call fails, as if the database were unreachable.
    broken: bool,
    /// Username lookups never see existing accounts, so only the insert
    /// can catch a duplicate.
    hide_accounts_from_lookup: bool,
}

impl FakeStore {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Simulates losing a registration race: the lookup misses, the insert conflicts.
    pub fn racy() -> Self {
        Self {
            hide_accounts_from_lookup: true,
            ..Self::default()
        }
    }

    pub fn seed_account(&self, username: &str) -> AccountId {
        let mut accounts = self.accounts.lock().unwrap();
        let account_id = accounts.len() as AccountId + 1;
        accounts.push(Account {
            account_id,
            username: username.into(),
            password: "pw1234".into(),
        });
        account_id
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            bail!("connection refused");
        }
        Ok(())
    }
}

impl AccountStore for FakeStore {
    fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>> {
        self.enter()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.username == username) {
            return Ok(None);
        }
        let account = Account {
            account_id: accounts.len() as AccountId + 1,
            username: username.into(),
            password: password.into(),
        };
        accounts.push(account.clone());
        Ok(Some(account))
    }

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.enter()?;
        if self.hide_accounts_from_lookup {
            return Ok(None);
        }
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    fn find_account_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>> {
        self.enter()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .cloned())
    }

    fn find_account_by_id(&self, account_id: AccountId) -> Result<Option<Account>> {
        self.enter()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.account_id == account_id).cloned())
    }
}

impl MessageStore for FakeStore {
    fn insert_message(&self, posted_by: AccountId, message_text: &str, time_posted_epoch: i64) -> Result<Message> {
        self.enter()?;
        let mut messages = self.messages.lock().unwrap();
        let message = Message {
            message_id: messages.len() as MessageId + 1,
            posted_by,
            message_text: message_text.into(),
            time_posted_epoch,
        };
        messages.push(message.clone());
        Ok(message)
    }

    fn all_messages(&self) -> Result<Vec<Message>> {
        self.enter()?;
        Ok(self.messages.lock().unwrap().clone())
    }

    fn find_message_by_id(&self, message_id: MessageId) -> Result<Option<Message>> {
        self.enter()?;
        let messages = self.messages.lock().unwrap();
        Ok(messages.iter().find(|m| m.message_id == message_id).cloned())
    }

    fn update_message_text(&self, message_id: MessageId, message_text: &str) -> Result<Option<Message>> {
        self.enter()?;
        let mut messages = self.messages.lock().unwrap();
        Ok(messages.iter_mut().find(|m| m.message_id == message_id).map(|m| {
            m.message_text = message_text.into();
            m.clone()
        }))
    }

    fn delete_message(&self, message_id: MessageId) -> Result<Option<Message>> {
        self.enter()?;
        let mut messages = self.messages.lock().unwrap();
        let idx = messages.iter().position(|m| m.message_id == message_id);
        Ok(idx.map(|i| messages.remove(i)))
    }

    fn messages_by_account(&self, account_id: AccountId) -> Result<Vec<Message>> {
        self.enter()?;
        let messages = self.messages.lock().unwrap();
        Ok(messages.iter().filter(|m| m.posted_by == account_id).cloned().collect())
    }
}
