use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{PointsCatalog, ScoringProfile};

pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_profiles(&self) -> Result<Vec<ScoringProfile>> {
        let profiles = sqlx::query_as::<_, ScoringProfile>(
            r#"
            SELECT profile_id, name, catalog, is_active, created_at
            FROM scoring_profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(profiles)
    }

    pub async fn get_active_profile(&self) -> Result<ScoringProfile> {
        let profile = sqlx::query_as::<_, ScoringProfile>(
            r#"
            SELECT profile_id, name, catalog, is_active, created_at
            FROM scoring_profiles
            WHERE is_active = true
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(profile)
    }

    /// Point values of the active profile, used wherever a result carries no
    /// catalog snapshot of its own
    pub async fn get_active_catalog(&self) -> Result<PointsCatalog> {
        let profile = self.get_active_profile().await?;
        Ok(profile.catalog.0)
    }
}
