//! RAG Server binary
//!
//! Run with: cargo run -p resolution-rag --bin resolution-rag-server

use resolution_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resolution_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║            Asistente de Consulta Normativa                ║
║         Resoluciones del MINAM con fuentes citadas        ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration (RAG_CONFIG, .env and environment overrides)
    let config = RagConfig::load(None)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Data file: {}", config.data.path.display());
    tracing::info!(
        "  - Embeddings: {:?} ({} dimensions)",
        config.embeddings.provider,
        config.embeddings.dimensions
    );
    tracing::info!("  - LLM: {:?} ({})", config.llm.provider, config.llm.model);
    tracing::info!(
        "  - Chunking: {} chars, {} overlap",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );

    let server = RagServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Page: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
