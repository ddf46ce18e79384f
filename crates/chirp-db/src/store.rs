//! Storage seams used by the services. `Database` is the SQLite
//! implementation; `MemoryStore` backs tests.

use anyhow::Result;
use chirp_types::{Message, NewMessage};

use crate::models::AccountRow;

pub trait AccountStore {
    /// Returns `None` when the username is already taken.
    fn insert_account(&self, username: &str, password_hash: &str) -> Result<Option<AccountRow>>;

    fn get_account_by_id(&self, account_id: i64) -> Result<Option<AccountRow>>;

    fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>>;
}

pub trait MessageStore {
    fn insert_message(&self, message: &NewMessage) -> Result<Message>;

    fn get_message_by_id(&self, message_id: i64) -> Result<Option<Message>>;

    fn get_messages(&self) -> Result<Vec<Message>>;

    fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<Message>>;

    /// Returns the number of rows changed.
    fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<usize>;

    /// Returns the number of rows removed.
    fn delete_message(&self, message_id: i64) -> Result<usize>;
}

/// Everything the services need, shareable across request tasks.
pub trait Store: AccountStore + MessageStore + Send + Sync + 'static {}

impl<T> Store for T where T: AccountStore + MessageStore + Send + Sync + 'static {}
