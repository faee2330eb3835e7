use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::profile::repo::Profile;

#[derive(Debug, Serialize, Default)]
pub struct ProfileResponse {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight_lbs: Option<f64>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            weight_lbs: p.weight_lbs,
            sex: p.sex,
            activity_level: p.activity_level,
            avatar_url: p.avatar_url,
            updated_at: Some(p.updated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PutProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight_lbs: Option<f64>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
    pub avatar_url: Option<String>,
}
