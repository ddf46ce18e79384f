use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use chirp_db::Store;
use chirp_types::Message;
use chirp_types::api::{PatchMessageRequest, PostMessageRequest};

use crate::error::ServiceError;
use crate::state::{AppState, blocking};

pub async fn post_message<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Json<Message>, ServiceError> {
    let Json(req) = payload?;
    let message = blocking(&state, move |s| s.messages.post_message(req)).await?;
    Ok(Json(message))
}

pub async fn get_all_messages<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Message>>, ServiceError> {
    let messages = blocking(&state, |s| s.messages.get_all_messages()).await?;
    Ok(Json(messages))
}

pub async fn get_message<S: Store>(
    State(state): State<AppState<S>>,
    Path(message_id): Path<i64>,
) -> Result<Response, ServiceError> {
    let message = blocking(&state, move |s| s.messages.get_message_by_id(message_id)).await?;
    Ok(json_or_empty(message))
}

pub async fn delete_message<S: Store>(
    State(state): State<AppState<S>>,
    Path(message_id): Path<i64>,
) -> Result<Response, ServiceError> {
    let deleted = blocking(&state, move |s| s.messages.delete_message_by_id(message_id)).await?;
    Ok(json_or_empty(deleted))
}

pub async fn patch_message<S: Store>(
    State(state): State<AppState<S>>,
    Path(message_id): Path<i64>,
    payload: Result<Json<PatchMessageRequest>, JsonRejection>,
) -> Result<Json<Message>, ServiceError> {
    let Json(req) = payload?;
    let message = blocking(&state, move |s| s.messages.patch_message_by_id(message_id, req)).await?;
    Ok(Json(message))
}

pub async fn get_account_messages<S: Store>(
    State(state): State<AppState<S>>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ServiceError> {
    let messages = blocking(&state, move |s| {
        s.messages.get_all_messages_by_account_id(account_id)
    })
    .await?;
    Ok(Json(messages))
}

/// Absent lookups are still a 200, just with nothing in the body.
fn json_or_empty<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
