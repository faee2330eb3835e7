use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::hydration::services::{DailyProgress, LogOutcome};
use crate::hydration::store::IntakeLogEntry;

#[derive(Debug, Serialize)]
pub struct DailyProgressResponse {
    pub date: Date,
    pub total_oz: f64,
    pub goal_oz: i32,
    pub percentage: u8,
}

impl From<DailyProgress> for DailyProgressResponse {
    fn from(p: DailyProgress) -> Self {
        Self {
            date: p.date,
            total_oz: p.total_oz,
            goal_oz: p.goal_oz,
            percentage: p.percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak_days: u32,
}

#[derive(Debug, Deserialize)]
pub struct LogIntakeRequest {
    pub amount_oz: f64,
    pub fluid_type_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct IntakeEntryResponse {
    pub id: Uuid,
    pub fluid_type_id: Uuid,
    pub amount_oz: f64,
    pub date: Date,
    pub logged_at: OffsetDateTime,
}

impl From<IntakeLogEntry> for IntakeEntryResponse {
    fn from(e: IntakeLogEntry) -> Self {
        Self {
            id: e.id,
            fluid_type_id: e.fluid_type_id,
            amount_oz: e.amount_oz,
            date: e.date,
            logged_at: e.logged_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogIntakeResponse {
    pub entry: IntakeEntryResponse,
    pub progress: DailyProgressResponse,
    pub streak_days: u32,
}

impl From<LogOutcome> for LogIntakeResponse {
    fn from(o: LogOutcome) -> Self {
        Self {
            entry: o.entry.into(),
            progress: o.progress.into(),
            streak_days: o.streak_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn progress_serializes_with_iso_date() {
        let response = DailyProgressResponse {
            date: date!(2025 - 03 - 10),
            total_oz: 12.0,
            goal_oz: 64,
            percentage: 19,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"2025-03-10\""));
        assert!(json.contains("\"goal_oz\":64"));
        assert!(json.contains("\"percentage\":19"));
    }
}
