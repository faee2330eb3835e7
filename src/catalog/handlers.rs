use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FluidTypeItem {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub hydration_factor: Option<f64>,
}

/// GET /fluid-types
#[instrument(skip(state))]
pub async fn list_fluid_types(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<FluidTypeItem>>, ApiError> {
    let types = state.catalog.list().await?;
    let items = types
        .into_iter()
        .map(|t| FluidTypeItem {
            id: t.id,
            name: t.name,
            color: t.color,
            hydration_factor: t.hydration_factor,
        })
        .collect();
    Ok(Json(items))
}
