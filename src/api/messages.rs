use crate::api::AppState;
use crate::api::middleware::{ApiJson, ApiPath, AuthUser};
use crate::api::schemas::messages::{
    MessageDetail, MessageEnvelope, MessageList, ReadReceiptInfo, SendMessage, SentMessageInfo,
};
use crate::error::Result;
use axum::{Json, extract::State};

/// Lists the caller's messages.
///
/// # Errors
/// Returns `AppError::AuthError` if the caller is not authenticated.
pub async fn list_messages(auth_user: AuthUser, State(state): State<AppState>) -> Result<Json<MessageList>> {
    let messages = state.message_service.list(&auth_user.username).await?;

    Ok(Json(MessageList { messages: messages.into_iter().map(Into::into).collect() }))
}

/// Returns one message the caller sent or received.
///
/// # Errors
/// Returns `AppError::NotFound` if the message does not exist.
/// Returns `AppError::Forbidden` if the caller is neither sender nor recipient.
pub async fn get_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageEnvelope<MessageDetail>>> {
    let message = state.message_service.get(&auth_user.username, id).await?;

    Ok(Json(MessageEnvelope { message: message.into() }))
}

/// Sends a message from the caller.
///
/// # Errors
/// Returns `AppError::BadRequest` if the payload is missing, malformed or empty.
/// Returns `AppError::NotFound` if the recipient does not exist.
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SendMessage>,
) -> Result<Json<MessageEnvelope<SentMessageInfo>>> {
    let message = state.message_service.send(&auth_user.username, &payload.to_username, &payload.body).await?;

    Ok(Json(MessageEnvelope { message: message.into() }))
}

/// Marks a message as read by its recipient.
///
/// # Errors
/// Returns `AppError::NotFound` if the message does not exist.
/// Returns `AppError::Forbidden` if the caller is not the recipient.
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageEnvelope<ReadReceiptInfo>>> {
    let receipt = state.message_service.mark_read(&auth_user.username, id).await?;

    Ok(Json(MessageEnvelope { message: receipt.into() }))
}
