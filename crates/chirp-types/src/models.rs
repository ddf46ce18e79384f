use serde::{Deserialize, Serialize};

/// A registered account as seen by clients. The password never leaves the
/// server, so it has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    /// Id of the authoring account.
    pub posted_by: i64,
    pub message_text: String,
    /// Seconds since the Unix epoch.
    pub time_posted_epoch: i64,
}

/// A message that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl NewMessage {
    pub fn with_id(self, message_id: i64) -> Message {
        Message {
            message_id,
            posted_by: self.posted_by,
            message_text: self.message_text,
            time_posted_epoch: self.time_posted_epoch,
        }
    }
}
