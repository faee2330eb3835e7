use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::hydration::store::{IntakeLogEntry, IntakeLogStore, IntakeRow, NewIntakeEntry};

#[derive(Clone)]
pub struct PgIntakeLog {
    db: PgPool,
}

impl PgIntakeLog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IntakeLogStore for PgIntakeLog {
    async fn insert(&self, entry: NewIntakeEntry) -> anyhow::Result<IntakeLogEntry> {
        let row = sqlx::query_as::<_, IntakeLogEntry>(
            r#"
            INSERT INTO hydration_logs (user_id, fluid_type_id, amount_oz, date, logged_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, fluid_type_id, amount_oz, date, logged_at
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.fluid_type_id)
        .bind(entry.amount_oz)
        .bind(entry.date)
        .bind(entry.logged_at)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn query_range(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<IntakeRow>> {
        // LEFT JOIN so an entry whose fluid type vanished still aggregates
        let rows = sqlx::query_as::<_, IntakeRow>(
            r#"
            SELECT h.amount_oz, f.hydration_factor, h.date
            FROM hydration_logs h
            LEFT JOIN fluid_types f ON f.id = h.fluid_type_id
            WHERE h.user_id = $1 AND h.date BETWEEN $2 AND $3
            ORDER BY h.date DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<IntakeLogEntry>> {
        let rows = sqlx::query_as::<_, IntakeLogEntry>(
            r#"
            SELECT id, user_id, fluid_type_id, amount_oz, date, logged_at
            FROM hydration_logs
            WHERE user_id = $1 AND date = $2
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
