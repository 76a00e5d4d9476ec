//! Voxpipe HTTP server - synthesis endpoint for a downstream voice pipeline.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod error;

use voxpipe_core::{Synthesizer, TtsConfig};

#[derive(Debug, Parser)]
#[command(
    name = "voxpipe-server",
    about = "HTTP API server for Voxpipe text-to-speech synthesis",
    version = env!("CARGO_PKG_VERSION")
)]
struct ServerArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8055)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = ServerArgs::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxpipe_server=info,voxpipe_core=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Voxpipe TTS server");

    // Load configuration once; it is immutable for the process lifetime.
    let cfg = TtsConfig::from_env();
    if cfg.engine_configured() {
        info!("Found synthesis engine at {:?}", cfg.piper_bin);
        info!("Default voice model: {:?}", cfg.default_model);
    } else {
        warn!(
            "Synthesis engine not configured (binary {:?}, model {:?}). \
             Requests will fail until PIPER_BIN and PIPER_MODEL point at real files.",
            cfg.piper_bin, cfg.default_model
        );
    }
    info!(
        "Output format: {} Hz, {} channel(s), s16",
        cfg.target_rate, cfg.target_channels
    );

    let state = api::AppState::new(Synthesizer::new(cfg));
    let app = api::router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
