use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    /// Service identity excluded from every ranking output
    pub sentinel_participant_id: Option<Uuid>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let sentinel_participant_id = match std::env::var("SENTINEL_PARTICIPANT_ID") {
            Ok(raw) if !raw.is_empty() => Some(
                raw.parse()
                    .context("SENTINEL_PARTICIPANT_ID must be a UUID")?,
            ),
            _ => None,
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            sentinel_participant_id,
        })
    }
}
