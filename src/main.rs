use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use progex_engine::api::{self, middleware::EngineConfig};

#[derive(Parser)]
#[command(name = "progexd")]
#[command(about = "Rule-based AI engine for student project guidance")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the ProgexAI engine server
    Serve {
        /// Port for HTTP API (falls back to AI_ENGINE_PORT, then 6000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "progex_engine=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn resolve_port(cli_port: Option<u16>) -> u16 {
    cli_port
        .or_else(|| {
            std::env::var("AI_ENGINE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
        })
        .unwrap_or(6000)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let port = match cli.command {
        Some(Commands::Serve { port }) => resolve_port(port),
        None => resolve_port(None),
    };

    let config = EngineConfig::from_env();
    tracing::info!(
        "Starting ProgexAI engine on port {} (origins: {:?})",
        port,
        config.allowed_origins
    );

    let app = api::create_router(config);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("ProgexAI engine listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
