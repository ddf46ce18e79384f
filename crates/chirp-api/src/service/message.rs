use std::sync::Arc;

use tracing::info;

use chirp_db::{AccountStore, MessageStore};
use chirp_types::api::{PatchMessageRequest, PostMessageRequest};
use chirp_types::{MAX_MESSAGE_LEN, Message, NewMessage};

use crate::error::ServiceError;

pub struct MessageService<S> {
    store: Arc<S>,
}

impl<S: AccountStore + MessageStore> MessageService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn post_message(&self, req: PostMessageRequest) -> Result<Message, ServiceError> {
        check_text(&req.message_text)?;

        if self.store.get_account_by_id(req.posted_by)?.is_none() {
            return Err(ServiceError::InvalidUserId(req.posted_by));
        }

        let message = self.store.insert_message(&NewMessage {
            posted_by: req.posted_by,
            message_text: req.message_text,
            time_posted_epoch: req
                .time_posted_epoch
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
        })?;

        info!("Account {} posted message {}", message.posted_by, message.message_id);
        Ok(message)
    }

    pub fn get_all_messages(&self) -> Result<Vec<Message>, ServiceError> {
        Ok(self.store.get_messages()?)
    }

    /// A missing message is `Ok(None)`, not an error.
    pub fn get_message_by_id(&self, message_id: i64) -> Result<Option<Message>, ServiceError> {
        Ok(self.store.get_message_by_id(message_id)?)
    }

    /// Returns the message as it was before deletion, or `None` if there was
    /// nothing to delete.
    pub fn delete_message_by_id(&self, message_id: i64) -> Result<Option<Message>, ServiceError> {
        let Some(message) = self.store.get_message_by_id(message_id)? else {
            return Ok(None);
        };

        if self.store.delete_message(message_id)? == 0 {
            return Ok(None);
        }

        info!("Deleted message {}", message_id);
        Ok(Some(message))
    }

    /// Replace the text of an existing message. Author and timestamp are kept.
    pub fn patch_message_by_id(
        &self,
        message_id: i64,
        req: PatchMessageRequest,
    ) -> Result<Message, ServiceError> {
        let existing = self
            .store
            .get_message_by_id(message_id)?
            .ok_or(ServiceError::InvalidMessageId(message_id))?;

        check_text(&req.message_text)?;

        if self.store.update_message_text(message_id, &req.message_text)? == 0 {
            return Err(ServiceError::InvalidMessageId(message_id));
        }

        info!("Updated text of message {}", message_id);
        Ok(Message {
            message_text: req.message_text,
            ..existing
        })
    }

    pub fn get_all_messages_by_account_id(
        &self,
        account_id: i64,
    ) -> Result<Vec<Message>, ServiceError> {
        Ok(self.store.get_messages_by_account(account_id)?)
    }
}

fn check_text(text: &str) -> Result<(), ServiceError> {
    if text.is_empty() || text.chars().count() > MAX_MESSAGE_LEN {
        return Err(ServiceError::InvalidMessageText);
    }
    Ok(())
}
