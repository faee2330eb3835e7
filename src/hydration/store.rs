use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// One logged intake event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IntakeLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fluid_type_id: Uuid,
    pub amount_oz: f64,
    pub date: Date,
    pub logged_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewIntakeEntry {
    pub user_id: Uuid,
    pub fluid_type_id: Uuid,
    pub amount_oz: f64,
    pub date: Date,
    pub logged_at: OffsetDateTime,
}

/// Aggregation row: an entry's amount joined with its fluid type's
/// hydration factor. The factor is optional so a missing catalog row
/// degrades to plain water.
#[derive(Debug, Clone, FromRow)]
pub struct IntakeRow {
    pub amount_oz: f64,
    pub hydration_factor: Option<f64>,
    pub date: Date,
}

#[async_trait]
pub trait IntakeLogStore: Send + Sync {
    async fn insert(&self, entry: NewIntakeEntry) -> anyhow::Result<IntakeLogEntry>;

    /// Entries for `user_id` with `from <= date <= to`, joined with the
    /// fluid type catalog.
    async fn query_range(&self, user_id: Uuid, from: Date, to: Date)
        -> anyhow::Result<Vec<IntakeRow>>;

    /// Raw entries for a single day, newest first.
    async fn list_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<IntakeLogEntry>>;
}
