use axum::{Json, extract::State, extract::rejection::JsonRejection};

use chirp_db::Store;
use chirp_types::Account;
use chirp_types::api::AccountRequest;

use crate::error::ServiceError;
use crate::state::{AppState, blocking};

pub async fn register<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ServiceError> {
    let Json(req) = payload?;
    let account = blocking(&state, move |s| s.accounts.register(&req)).await?;
    Ok(Json(account))
}

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ServiceError> {
    let Json(req) = payload?;
    let account = blocking(&state, move |s| s.accounts.login(&req)).await?;
    Ok(Json(account))
}
