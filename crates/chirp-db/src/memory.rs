use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use chirp_types::{Message, NewMessage};

use crate::models::AccountRow;
use crate::store::{AccountStore, MessageStore};

/// In-process store with the same semantics as `Database`: ids start at 1,
/// usernames are unique, listings come back in id order.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i64, AccountRow>,
    messages: BTreeMap<i64, Message>,
    last_account_id: i64,
    last_message_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.inner
            .lock()
            .map_err(|e| anyhow::anyhow!("Memory store lock poisoned: {}", e))
    }
}

impl AccountStore for MemoryStore {
    fn insert_account(&self, username: &str, password_hash: &str) -> Result<Option<AccountRow>> {
        let mut tables = self.tables()?;
        if tables.accounts.values().any(|a| a.username == username) {
            return Ok(None);
        }

        tables.last_account_id += 1;
        let row = AccountRow {
            account_id: tables.last_account_id,
            username: username.to_string(),
            password: password_hash.to_string(),
        };
        tables.accounts.insert(row.account_id, row.clone());
        Ok(Some(row))
    }

    fn get_account_by_id(&self, account_id: i64) -> Result<Option<AccountRow>> {
        Ok(self.tables()?.accounts.get(&account_id).cloned())
    }

    fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        Ok(self
            .tables()?
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }
}

impl MessageStore for MemoryStore {
    fn insert_message(&self, message: &NewMessage) -> Result<Message> {
        let mut tables = self.tables()?;
        tables.last_message_id += 1;
        let stored = message.clone().with_id(tables.last_message_id);
        tables.messages.insert(stored.message_id, stored.clone());
        Ok(stored)
    }

    fn get_message_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        Ok(self.tables()?.messages.get(&message_id).cloned())
    }

    fn get_messages(&self) -> Result<Vec<Message>> {
        Ok(self.tables()?.messages.values().cloned().collect())
    }

    fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .tables()?
            .messages
            .values()
            .filter(|m| m.posted_by == account_id)
            .cloned()
            .collect())
    }

    fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<usize> {
        let mut tables = self.tables()?;
        match tables.messages.get_mut(&message_id) {
            Some(message) => {
                message.message_text = message_text.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_message(&self, message_id: i64) -> Result<usize> {
        Ok(usize::from(self.tables()?.messages.remove(&message_id).is_some()))
    }
}
