use chirp_types::Account;

/// Account row as stored, including the password hash.
/// Messages carry nothing private, so they map straight to `chirp_types::Message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            account_id: row.account_id,
            username: row.username,
        }
    }
}
