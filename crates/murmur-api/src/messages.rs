use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use murmur_types::api::{CreateMessageRequest, UpdateMessageRequest};
use murmur_types::models::{AccountId, Message, MessageId};

use crate::error::status_for;
use crate::state::{AppState, run_blocking};

/// Missing records answer 200 with an empty body rather than 404.
fn found_or_empty(message: Option<Message>) -> Response {
    match message {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let message = run_blocking(&state, move |s| s.messages.create_message(&req))
        .await?
        .map_err(|e| status_for(e, StatusCode::BAD_REQUEST))?;

    Ok(Json(message))
}

/// GET /messages
pub async fn get_all_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    let messages = run_blocking(&state, |s| s.messages.get_all_messages())
        .await?
        .map_err(|e| status_for(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(messages))
}

/// GET /messages/{message_id}
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<MessageId>,
) -> Result<Response, StatusCode> {
    let message = run_blocking(&state, move |s| s.messages.get_message_by_id(message_id))
        .await?
        .map_err(|e| status_for(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(found_or_empty(message))
}

/// DELETE /messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<MessageId>,
) -> Result<Response, StatusCode> {
    let deleted = run_blocking(&state, move |s| s.messages.delete_message(message_id))
        .await?
        .map_err(|e| status_for(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(found_or_empty(deleted))
}

/// PATCH /messages/{message_id}
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<MessageId>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let message = run_blocking(&state, move |s| {
        s.messages
            .update_message_text(message_id, req.message_text.as_deref())
    })
    .await?
    .map_err(|e| status_for(e, StatusCode::BAD_REQUEST))?;

    Ok(Json(message))
}

/// GET /accounts/{account_id}/messages
pub async fn get_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<impl IntoResponse, StatusCode> {
    let messages = run_blocking(&state, move |s| {
        s.messages.get_messages_by_account_id(account_id)
    })
    .await?
    .map_err(|e| status_for(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(messages))
}
