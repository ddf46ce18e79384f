use serde::Deserialize;

// -- Accounts --

/// Body of `/register` and `/login`. Clients of the original service also
/// send `accountId`, which is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// -- Messages --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    pub posted_by: i64,
    #[serde(default)]
    pub message_text: String,
    /// Stamped with the current time when absent.
    pub time_posted_epoch: Option<i64>,
}

/// Only `messageText` is read; other message fields in the body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchMessageRequest {
    #[serde(default)]
    pub message_text: String,
}
