use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use course_recommender::{
    api::{cors_layer, create_router, AppState},
    config::Config,
    services::{CsvScoreSource, Dataset, RecommendationContext, ThreadRngPicker},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Load and derive everything before accepting requests
    let source = CsvScoreSource::new(&config.dataset_path);
    let dataset = Dataset::load(&source)
        .await
        .with_context(|| format!("failed to load dataset from {}", source.path().display()))?;
    let context = RecommendationContext::build_blocking(dataset, Arc::new(ThreadRngPicker)).await?;
    let state = AppState::new(context);

    let origins = config.allowed_origins();
    let app = create_router(state).layer(cors_layer(origins.as_deref()));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
