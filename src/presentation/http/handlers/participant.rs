//! Participant Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::RegisterParticipantRequest;
use crate::application::dto::response::ParticipantResponse;
use crate::application::services::ParticipantService;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a participant
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), AppError> {
    let participant = state.participant_service().register(&body.name).await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))))
}

/// List registered participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantResponse>>, AppError> {
    let participants = state.participant_service().list().await?;

    Ok(Json(
        participants.into_iter().map(ParticipantResponse::from).collect(),
    ))
}
