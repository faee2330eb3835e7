use axum::{extract::State, Json};
use tracing::{info, instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::profile::dto::{ProfileResponse, PutProfileRequest};
use crate::profile::repo::ProfileFields;
use crate::state::AppState;

/// GET /profile — an account that never saved a profile gets an empty one
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profiles.get(user_id).await?;
    Ok(Json(profile.map(Into::into).unwrap_or_default()))
}

/// PUT /profile
#[instrument(skip(state, body))]
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<PutProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    if let Some(weight) = body.weight_lbs {
        if !weight.is_finite() || weight <= 0.0 || weight > 1000.0 {
            warn!(user_id = %user_id, weight, "rejected profile weight");
            return Err(ApiError::Validation(
                "weight must be between 1 and 1000 lbs".into(),
            ));
        }
    }

    let fields = ProfileFields {
        first_name: normalize(body.first_name),
        last_name: normalize(body.last_name),
        weight_lbs: body.weight_lbs,
        sex: normalize(body.sex),
        activity_level: normalize(body.activity_level),
        avatar_url: normalize(body.avatar_url),
    };

    let profile = state.profiles.upsert(user_id, fields).await?;
    info!(user_id = %user_id, "profile updated");
    Ok(Json(profile.into()))
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_empty() {
        assert_eq!(normalize(Some("  male ".into())), Some("male".into()));
        assert_eq!(normalize(Some("   ".into())), None);
        assert_eq!(normalize(None), None);
    }
}
