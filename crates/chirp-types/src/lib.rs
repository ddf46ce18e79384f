pub mod api;
pub mod models;

pub use models::{Account, Message, NewMessage};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Longest message text, in characters.
pub const MAX_MESSAGE_LEN: usize = 254;
