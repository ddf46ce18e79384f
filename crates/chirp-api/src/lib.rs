pub mod auth;
pub mod error;
pub mod messages;
pub mod routes;
pub mod service;
pub mod state;

pub use error::ServiceError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
