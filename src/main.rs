use std::sync::Arc;

use poster_prompt_api::{
    api::{create_router, serve, AppState},
    config::Config,
    db::{create_pool, create_redis_client, Cache, MovieStore, PgMovieStore},
    services::{EmbeddingModel, GenreCatalog, HttpEmbeddingModel, InteractionRecorder, PromptService},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.max_db_connections).await?;
    let store: Arc<dyn MovieStore> = Arc::new(PgMovieStore::new(pool));
    tracing::info!("Connected to movie database");

    let model: Arc<dyn EmbeddingModel> = Arc::new(HttpEmbeddingModel::from_config(&config)?);
    tracing::info!(
        model = %config.embedding_model,
        dimensions = model.dimensions(),
        "Embedding model configured"
    );

    let (recorder, recorder_handle) = InteractionRecorder::spawn(store.clone());
    let prompt_service = PromptService::new(store.clone(), model, recorder, config.top_k);

    let mut genre_catalog = GenreCatalog::new(store);
    if let Some(redis_url) = &config.redis_url {
        let cache = Cache::new(create_redis_client(redis_url)?);
        genre_catalog = genre_catalog.with_cache(cache, config.genre_cache_ttl);
        tracing::info!(ttl = config.genre_cache_ttl, "Genre cache enabled");
    }

    let app = create_router(AppState::new(prompt_service, genre_catalog));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");

    serve(listener, app, shutdown_signal(), recorder_handle).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
