use std::sync::Arc;

use tracing::error;

use chirp_db::Store;

use crate::error::ServiceError;
use crate::service::{AccountService, MessageService};

pub type AppState<S> = Arc<AppStateInner<S>>;

pub struct AppStateInner<S> {
    pub accounts: AccountService<S>,
    pub messages: MessageService<S>,
}

impl<S: Store> AppStateInner<S> {
    pub fn new(store: Arc<S>) -> AppState<S> {
        Arc::new(Self {
            accounts: AccountService::new(store.clone()),
            messages: MessageService::new(store),
        })
    }
}

/// Run a service call off the async runtime; storage calls block.
pub(crate) async fn blocking<S, T, F>(state: &AppState<S>, f: F) -> Result<T, ServiceError>
where
    S: Store,
    T: Send + 'static,
    F: FnOnce(&AppStateInner<S>) -> Result<T, ServiceError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ServiceError::Storage(e.into())
        })?
}
