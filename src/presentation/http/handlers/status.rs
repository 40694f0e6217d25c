//! Presence Handlers

use axum::{extract::State, http::StatusCode};

use crate::application::services::ParticipantService;
use crate::presentation::http::extractors::ChatUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Heartbeat: keeps the caller from being reaped
pub async fn heartbeat(
    State(state): State<AppState>,
    ChatUser(name): ChatUser,
) -> Result<StatusCode, AppError> {
    state.participant_service().heartbeat(&name).await?;

    Ok(StatusCode::OK)
}
