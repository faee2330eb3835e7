use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{parse_clock, CreateReminderRequest, PatchReminderRequest, ReminderResponse};
use super::repo;

/// GET /reminders
#[instrument(skip(state))]
pub async fn list_reminders(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ReminderResponse>>, ApiError> {
    let reminders = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

/// POST /reminders
#[instrument(skip(state, body))]
pub async fn create_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<ReminderResponse>), ApiError> {
    let time = parse_clock(&body.time)?;
    let reminder = repo::create(&state.db, user_id, time, body.message).await?;
    info!(user_id = %user_id, reminder_id = %reminder.id, "reminder created");
    Ok((StatusCode::CREATED, Json(reminder.into())))
}

/// PATCH /reminders/:id
#[instrument(skip(state, body))]
pub async fn patch_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<PatchReminderRequest>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let time = body.time.as_deref().map(parse_clock).transpose()?;
    let reminder = repo::update(&state.db, user_id, id, time, body.message, body.is_active)
        .await?
        .ok_or_else(|| ApiError::NotFound("reminder not found".into()))?;
    Ok(Json(reminder.into()))
}

/// DELETE /reminders/:id
#[instrument(skip(state))]
pub async fn delete_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("reminder not found".into()));
    }
    info!(user_id = %user_id, reminder_id = %id, "reminder deleted");
    Ok(StatusCode::NO_CONTENT)
}
