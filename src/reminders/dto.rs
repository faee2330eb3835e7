use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Time;
use uuid::Uuid;

use crate::error::ApiError;
use crate::reminders::repo::Reminder;

/// Wall-clock reminder times travel as "HH:MM" strings.
pub fn parse_clock(s: &str) -> Result<Time, ApiError> {
    Time::parse(s, format_description!("[hour]:[minute]"))
        .map_err(|_| ApiError::Validation(format!("invalid time {s:?}, expected HH:MM")))
}

fn format_clock(t: Time) -> String {
    t.format(format_description!("[hour]:[minute]"))
        .expect("HH:MM formatting cannot fail")
}

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub time: String,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchReminderRequest {
    pub time: Option<String>,
    pub message: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub id: Uuid,
    pub time: String,
    pub message: Option<String>,
    pub is_active: bool,
}

impl From<Reminder> for ReminderResponse {
    fn from(r: Reminder) -> Self {
        Self {
            id: r.id,
            time: format_clock(r.time),
            message: r.message,
            is_active: r.is_active,
        }
    }
}
