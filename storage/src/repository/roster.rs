use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Driver, Team};

pub struct RosterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RosterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_code, name, class
            FROM teams
            ORDER BY class, team_code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn list_drivers(&self) -> Result<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT driver_code, full_name, team_code, class
            FROM drivers
            ORDER BY class, driver_code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(drivers)
    }

    /// Live driver -> constructor mapping. Scoring consults this only when a
    /// result carries no roster snapshot entry for a driver.
    pub async fn get_live_roster(&self) -> Result<HashMap<String, String>> {
        let drivers = self.list_drivers().await?;

        Ok(drivers
            .into_iter()
            .map(|d| (d.driver_code, d.team_code))
            .collect())
    }
}
