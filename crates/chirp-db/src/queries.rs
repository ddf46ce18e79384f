use crate::Database;
use crate::models::AccountRow;
use crate::store::{AccountStore, MessageStore};
use anyhow::Result;
use chirp_types::{Message, NewMessage};
use rusqlite::{Connection, Row};

const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

impl AccountStore for Database {
    fn insert_account(&self, username: &str, password_hash: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            // The UNIQUE constraint decides races between concurrent registrations.
            let inserted = conn.execute(
                "INSERT INTO accounts (username, password) VALUES (?1, ?2)
                 ON CONFLICT(username) DO NOTHING",
                (username, password_hash),
            )?;
            if inserted == 0 {
                return Ok(None);
            }

            Ok(Some(AccountRow {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password_hash.to_string(),
            }))
        })
    }

    fn get_account_by_id(&self, account_id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT account_id, username, password FROM accounts WHERE account_id = ?1",
                [account_id],
                account_from_row,
            )
            .optional()
        })
    }

    fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT account_id, username, password FROM accounts WHERE username = ?1",
                [username],
                account_from_row,
            )
            .optional()
        })
    }
}

impl MessageStore for Database {
    fn insert_message(&self, message: &NewMessage) -> Result<Message> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                rusqlite::params![message.posted_by, message.message_text, message.time_posted_epoch],
            )?;
            Ok(message.clone().with_id(conn.last_insert_rowid()))
        })
    }

    fn get_message_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE message_id = ?1"),
                [message_id],
                message_from_row,
            )
            .optional()
        })
    }

    fn get_messages(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY message_id"),
                rusqlite::params![],
            )
        })
    }

    fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM messages WHERE posted_by = ?1 ORDER BY message_id"
                ),
                rusqlite::params![account_id],
            )
        })
    }

    fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE messages SET message_text = ?2 WHERE message_id = ?1",
                rusqlite::params![message_id, message_text],
            )?;
            Ok(changed)
        })
    }

    fn delete_message(&self, message_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE message_id = ?1", [message_id])?;
            Ok(removed)
        })
    }
}

fn query_messages<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map(params, message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
