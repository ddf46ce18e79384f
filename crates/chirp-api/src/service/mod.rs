//! Validation and business rules, sitting between the HTTP handlers and storage.

pub mod account;
pub mod message;

pub use account::AccountService;
pub use message::MessageService;
