use prancing_pony::api::{self, AppState};
use prancing_pony::config::Settings;
use prancing_pony::services::{LlmCallLogger, OpenAiConfig, OpenAiSummarizer};

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prancing_pony=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting The Prancing Pony v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_env()?;

    if settings.openai_api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; summary generation will fail");
    }

    let summarizer = OpenAiSummarizer::new(
        OpenAiConfig {
            api_key: settings.openai_api_key.clone(),
            base_url: settings.openai_base_url.clone(),
            model: settings.openai_model.clone(),
            request_timeout: settings.summary_timeout,
            prompts_dir: settings.prompts_dir.clone(),
        },
        settings.llm_log_dir.clone().map(LlmCallLogger::new),
    )?;
    let engine = Arc::new(summarizer);

    let state = match &settings.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(settings.database_max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database connected and migrated");

            AppState::postgres(pool, engine, settings.summary_timeout)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            AppState::in_memory(engine, settings.summary_timeout)
        }
    };

    let cors = if settings.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins = settings
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = api::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = settings.bind_address();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
