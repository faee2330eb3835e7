use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::hydration::goal::{ActivityLevel, Sex};

/// Per-user attributes. `sex` and `activity_level` are stored as free text,
/// exactly as the client sent them; unknown values simply contribute no
/// multiplier to the goal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight_lbs: Option<f64>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    /// Inputs for the daily-goal calculation, with unparseable attribute
    /// strings dropped.
    pub fn goal_inputs(&self) -> (Option<f64>, Option<Sex>, Option<ActivityLevel>) {
        (
            self.weight_lbs,
            self.sex.as_deref().and_then(Sex::parse),
            self.activity_level.as_deref().and_then(ActivityLevel::parse),
        )
    }
}

/// Full replacement payload for an upsert.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub weight_lbs: Option<f64>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
    pub avatar_url: Option<String>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> anyhow::Result<Profile>;
}

#[derive(Clone)]
pub struct PgProfiles {
    db: PgPool,
}

impl PgProfiles {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfiles {
    async fn get(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, first_name, last_name, weight_lbs, sex, activity_level,
                   avatar_url, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(profile)
    }

    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, first_name, last_name, weight_lbs, sex,
                                  activity_level, avatar_url, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, now())
            ON CONFLICT (user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                weight_lbs = EXCLUDED.weight_lbs,
                sex = EXCLUDED.sex,
                activity_level = EXCLUDED.activity_level,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = now()
            RETURNING user_id, first_name, last_name, weight_lbs, sex, activity_level,
                      avatar_url, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.weight_lbs)
        .bind(&fields.sex)
        .bind(&fields.activity_level)
        .bind(&fields.avatar_url)
        .fetch_one(&self.db)
        .await?;
        Ok(profile)
    }
}
