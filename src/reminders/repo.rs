use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

/// A scheduled hydration nudge. Delivery happens client-side; this service
/// only stores the schedule.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time: Time,
    pub message: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Reminder>> {
    let rows = sqlx::query_as::<_, Reminder>(
        r#"
        SELECT id, user_id, time, message, is_active, created_at, updated_at
        FROM reminders
        WHERE user_id = $1
        ORDER BY time
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    time: Time,
    message: Option<String>,
) -> anyhow::Result<Reminder> {
    let row = sqlx::query_as::<_, Reminder>(
        r#"
        INSERT INTO reminders (user_id, time, message)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, time, message, is_active, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(time)
    .bind(message)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Partial update; absent fields keep their stored value. Returns None when
/// the reminder does not exist or belongs to another user.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    time: Option<Time>,
    message: Option<String>,
    is_active: Option<bool>,
) -> anyhow::Result<Option<Reminder>> {
    let row = sqlx::query_as::<_, Reminder>(
        r#"
        UPDATE reminders SET
            time = COALESCE($3, time),
            message = COALESCE($4, message),
            is_active = COALESCE($5, is_active),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, time, message, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(time)
    .bind(message)
    .bind(is_active)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM reminders
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
