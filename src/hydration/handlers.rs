use axum::{extract::State, http::StatusCode, Json};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    DailyProgressResponse, IntakeEntryResponse, LogIntakeRequest, LogIntakeResponse,
    StreakResponse,
};
use super::services;

/// GET /hydration/today
#[instrument(skip(state))]
pub async fn today(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DailyProgressResponse>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let progress = services::today_progress(
        state.profiles.as_ref(),
        state.intake.as_ref(),
        user_id,
        today,
    )
    .await?;
    Ok(Json(progress.into()))
}

/// GET /hydration/streak
#[instrument(skip(state))]
pub async fn streak(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StreakResponse>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let streak_days = services::streak_days(
        state.profiles.as_ref(),
        state.intake.as_ref(),
        user_id,
        today,
    )
    .await?;
    Ok(Json(StreakResponse { streak_days }))
}

/// GET /hydration/logs — today's raw entries, newest first
#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<IntakeEntryResponse>>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let entries = state.intake.list_day(user_id, today).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// POST /hydration/logs
#[instrument(skip(state, body))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<LogIntakeRequest>,
) -> Result<(StatusCode, Json<LogIntakeResponse>), ApiError> {
    let now = OffsetDateTime::now_utc();
    let outcome = services::log_intake(
        state.profiles.as_ref(),
        state.intake.as_ref(),
        user_id,
        body.amount_oz,
        body.fluid_type_id,
        now,
        state.config.max_intake_oz,
    )
    .await?;

    info!(
        user_id = %user_id,
        amount_oz = body.amount_oz,
        fluid_type_id = %body.fluid_type_id,
        "intake logged"
    );
    Ok((StatusCode::CREATED, Json(outcome.into())))
}
