use serde::{Deserialize, Serialize};

pub type AccountId = i64;
pub type MessageId = i64;

/// A registered account as persisted by the store.
///
/// The password is stored and returned as plaintext; there is no hashing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: AccountId,
    pub username: String,
    pub password: String,
}

/// A posted message. `posted_by` and `time_posted_epoch` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub posted_by: AccountId,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
