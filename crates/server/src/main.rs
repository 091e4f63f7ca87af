use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

use server::app::create_app;
use server::config::Config;
use server::service::RagService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting career advisor server");

    let config = Config::load_from_env().unwrap_or_else(|_| {
        warn!("Could not load config, using development defaults");
        create_development_config()
    });
    let server_config = config.server.with_env_overrides();

    // The index is loaded or built here, before the listener binds, so no
    // request can observe a missing or partial index.
    let service = RagService::new(config)
        .await
        .context("Failed to initialize RAG service")?;
    info!("Vector index ready ({} entries)", service.index_len());

    let app = create_app(Arc::new(service));

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn create_development_config() -> Config {
    Config {
        server: server::config::ServerConfig {
            port: 3000,
            static_dir: "./public".to_string(),
        },
        embedding: embeddings::EmbeddingConfig {
            provider: "fallback".to_string(),
            model: None,
            dimensions: None,
        },
        llm: server::config::LlmConfig {
            model: "gpt-3.5-turbo-16k".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
        },
        index: server::config::IndexConfig {
            path: "./data.index".to_string(),
        },
        data: server::config::DataConfig {
            document_dir: "./data".to_string(),
        },
        retrieval: server::config::RetrievalConfig { top_k: 6 },
    }
}
