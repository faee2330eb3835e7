use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Catalog entry. Reference data maintained out of band; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FluidType {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub hydration_factor: Option<f64>,
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait FluidTypeCatalog: Send + Sync {
    /// All fluid types, ordered by name.
    async fn list(&self) -> anyhow::Result<Vec<FluidType>>;
}

#[derive(Clone)]
pub struct PgFluidTypes {
    db: PgPool,
}

impl PgFluidTypes {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FluidTypeCatalog for PgFluidTypes {
    async fn list(&self) -> anyhow::Result<Vec<FluidType>> {
        let rows = sqlx::query_as::<_, FluidType>(
            r#"
            SELECT id, name, color, hydration_factor, created_at
            FROM fluid_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
