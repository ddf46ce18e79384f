use axum::{
    Router,
    routing::{get, post},
};

use chirp_db::Store;

use crate::auth;
use crate::messages;
use crate::state::AppState;

pub fn router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/register", post(auth::register::<S>))
        .route("/login", post(auth::login::<S>))
        .route(
            "/messages",
            get(messages::get_all_messages::<S>).post(messages::post_message::<S>),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message::<S>)
                .delete(messages::delete_message::<S>)
                .patch(messages::patch_message::<S>),
        )
        .route(
            "/account/{account_id}/messages",
            get(messages::get_account_messages::<S>),
        )
        .with_state(state)
}
