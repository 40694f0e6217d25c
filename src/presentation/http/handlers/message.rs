//! Message Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{MessageListQuery, MessageRequest};
use crate::application::dto::response::MessageResponse;
use crate::application::services::MessageService;
use crate::presentation::http::extractors::{ChatUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::shared::snowflake;
use crate::startup::AppState;

/// Unknown and unparseable ids are both "no such message".
fn parse_message_id(raw: &str) -> Result<i64, AppError> {
    snowflake::from_string(raw).map_err(|_| AppError::NotFound(format!("Message {} not found", raw)))
}

/// Messages visible to the caller
pub async fn get_messages(
    State(state): State<AppState>,
    ChatUser(viewer): ChatUser,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let limit = query.limit()?;

    let messages = state.message_service().query(&viewer, limit).await?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Post a message as the caller
pub async fn send_message(
    State(state): State<AppState>,
    ChatUser(author): ChatUser,
    ValidatedJson(body): ValidatedJson<MessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let request = body.into_dto()?;

    let message = state.message_service().post(&author, request).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// Edit one of the caller's messages
pub async fn edit_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    ChatUser(author): ChatUser,
    ValidatedJson(body): ValidatedJson<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let message_id = parse_message_id(&message_id)?;
    let request = body.into_dto()?;

    let message = state
        .message_service()
        .edit(message_id, &author, request)
        .await?;

    Ok(Json(MessageResponse::from(message)))
}

/// Delete one of the caller's messages
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    ChatUser(author): ChatUser,
) -> Result<StatusCode, AppError> {
    let message_id = parse_message_id(&message_id)?;

    state.message_service().delete(message_id, &author).await?;

    Ok(StatusCode::OK)
}
