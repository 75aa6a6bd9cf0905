use std::sync::Arc;

use murmur_db::{AccountStore, MessageStore};
use murmur_types::api::CreateMessageRequest;
use murmur_types::models::{AccountId, Message, MessageId};
use tracing::debug;

use crate::error::{Rejection, ServiceResult};
use crate::service::AccountService;
use crate::validation;

/// Message CRUD. Referential checks against accounts go through
/// [`AccountService`] and only happen on create.
pub struct MessageService<M, A> {
    store: Arc<M>,
    accounts: Arc<AccountService<A>>,
}

impl<M: MessageStore, A: AccountStore> MessageService<M, A> {
    pub fn new(store: Arc<M>, accounts: Arc<AccountService<A>>) -> Self {
        Self { store, accounts }
    }

    pub fn create_message(&self, candidate: &CreateMessageRequest) -> ServiceResult<Message> {
        let text = validation::message_text(candidate.message_text.as_deref())?;
        let posted_by = candidate.posted_by.ok_or(Rejection::UnknownAccount)?;

        // Must complete before the insert: nothing is written for unknown posters.
        if !self.accounts.account_exists(posted_by)? {
            return Err(Rejection::UnknownAccount.into());
        }

        let posted_at = candidate
            .time_posted_epoch
            .unwrap_or_else(|| chrono::Utc::now().timestamp());

        let message = self.store.insert_message(posted_by, text, posted_at)?;
        debug!("Account {} posted message {}", posted_by, message.message_id);
        Ok(message)
    }

    /// Every persisted message, oldest id first. Empty when there are none.
    pub fn get_all_messages(&self) -> ServiceResult<Vec<Message>> {
        Ok(self.store.all_messages()?)
    }

    pub fn get_message_by_id(&self, message_id: MessageId) -> ServiceResult<Option<Message>> {
        Ok(self.store.find_message_by_id(message_id)?)
    }

    /// Returns the deleted record, or `None` if there was nothing to delete.
    pub fn delete_message(&self, message_id: MessageId) -> ServiceResult<Option<Message>> {
        let deleted = self.store.delete_message(message_id)?;
        if deleted.is_some() {
            debug!("Deleted message {}", message_id);
        }
        Ok(deleted)
    }

    /// Text is validated before the record is looked up; a missing record is
    /// a rejection like any other.
    pub fn update_message_text(
        &self,
        message_id: MessageId,
        new_text: Option<&str>,
    ) -> ServiceResult<Message> {
        let text = validation::message_text(new_text)?;

        let message = self
            .store
            .update_message_text(message_id, text)?
            .ok_or(Rejection::MessageNotFound)?;
        Ok(message)
    }

    /// No existence check: an unknown account simply has no messages.
    pub fn get_messages_by_account_id(&self, account_id: AccountId) -> ServiceResult<Vec<Message>> {
        Ok(self.store.messages_by_account(account_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::service::fake::FakeStore;

    fn service(store: &Arc<FakeStore>) -> MessageService<FakeStore, FakeStore> {
        let accounts = Arc::new(AccountService::new(store.clone()));
        MessageService::new(store.clone(), accounts)
    }

    fn post(posted_by: Option<AccountId>, text: &str) -> CreateMessageRequest {
        CreateMessageRequest {
            posted_by,
            message_text: Some(text.into()),
            time_posted_epoch: Some(1_669_947_792),
        }
    }

    #[test]
    fn unknown_poster_is_rejected_without_insert() {
        let store = Arc::new(FakeStore::default());
        let messages = service(&store);

        let err = messages.create_message(&post(Some(999_999), "hi")).unwrap_err();
        assert_eq!(err.rejection(), Some(Rejection::UnknownAccount));

        let err = messages.create_message(&post(None, "hi")).unwrap_err();
        assert_eq!(err.rejection(), Some(Rejection::UnknownAccount));

        assert_eq!(store.message_count(), 0);
    }

    #[test]
    fn create_stamps_current_time_when_omitted() {
        let store = Arc::new(FakeStore::default());
        let alice = store.seed_account("alice");
        let messages = service(&store);

        let before = chrono::Utc::now().timestamp();
        let created = messages
            .create_message(&CreateMessageRequest {
                posted_by: Some(alice),
                message_text: Some("  hi  ".into()),
                time_posted_epoch: None,
            })
            .unwrap();

        assert_eq!(created.message_text, "hi");
        assert!(created.time_posted_epoch >= before);
    }

    #[test]
    fn update_validates_text_before_looking_up_the_message() {
        let store = Arc::new(FakeStore::default());
        let messages = service(&store);

        let err = messages.update_message_text(1, Some("   ")).unwrap_err();
        assert_eq!(err.rejection(), Some(Rejection::BlankText));
        assert_eq!(store.calls(), 0);

        let err = messages.update_message_text(1, Some("fine")).unwrap_err();
        assert_eq!(err.rejection(), Some(Rejection::MessageNotFound));
    }

    #[test]
    fn store_faults_propagate_instead_of_looking_absent() {
        let store = Arc::new(FakeStore::broken());
        let messages = service(&store);

        assert!(matches!(messages.get_all_messages(), Err(ServiceError::Store(_))));
        assert!(matches!(messages.get_message_by_id(1), Err(ServiceError::Store(_))));
        assert!(matches!(messages.delete_message(1), Err(ServiceError::Store(_))));
        assert!(matches!(
            messages.create_message(&post(Some(1), "hi")),
            Err(ServiceError::Store(_))
        ));
    }
}
