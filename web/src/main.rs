use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::refresh::gate::RefreshGate;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::get_own_rank,
        features::usage::handlers::get_participant_usage,
        features::usage::handlers::get_popularity,
        features::scoring::handlers::list_profiles,
        features::scoring::handlers::get_active_profile,
        features::scoring::handlers::preview,
        features::refresh::handlers::refresh_status,
        features::refresh::handlers::trigger_refresh,
    ),
    components(
        schemas(
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::OwnRankResponse,
            storage::dto::leaderboard::ResolutionSource,
            storage::dto::usage::UsageCounts,
            storage::dto::usage::UsageResponse,
            storage::dto::usage::PopularityEntry,
            storage::dto::usage::PopularityResponse,
            storage::dto::scoring::ScoringProfileResponse,
            storage::dto::scoring::ScorePreviewRequest,
            storage::dto::scoring::ScorePreviewResponse,
            storage::dto::refresh::RefreshStatusResponse,
            storage::dto::refresh::RefreshTriggerResponse,
            storage::models::PointsCatalog,
            storage::models::PointsBreakdown,
        )
    ),
    tags(
        (name = "leaderboard", description = "Ranked season standings"),
        (name = "usage", description = "Pick usage and popularity"),
        (name = "scoring", description = "Scoring profiles and previews"),
        (name = "refresh", description = "Gated leaderboard recompute"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting GridPicks API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        db,
        refresh: RefreshGate::new(),
        api_keys: std::sync::Arc::new(ApiKeys::from_comma_separated(&config.api_keys)),
        sentinel_participant_id: config.sentinel_participant_id,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .nest("/api/leaderboard", features::leaderboard::routes::routes())
        .nest("/api/usage", features::usage::routes::routes())
        .nest("/api/scoring", features::scoring::routes::routes())
        .nest("/api/refresh", features::refresh::routes::routes())
        .nest("/api/admin", features::refresh::routes::admin_routes(state.clone()))
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
