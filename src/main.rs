use std::fs;
use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vidhive::config::{AuthConfig, ServerConfig};
use vidhive::server::{AppState, create_router};
use vidhive::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "vidhive")]
#[command(about = "A video sharing backend server", long_about = None)]
struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(long, short, default_value = "8080")]
    port: u16,

    /// Data directory for the database
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Secret for signing access tokens (falls back to VIDHIVE_ACCESS_SECRET)
    #[arg(long)]
    access_secret: Option<String>,

    /// Secret for signing refresh tokens (falls back to VIDHIVE_REFRESH_SECRET)
    #[arg(long)]
    refresh_secret: Option<String>,

    /// Access token lifetime in minutes
    #[arg(long, default_value = "15")]
    access_ttl_minutes: i64,

    /// Refresh token lifetime in days
    #[arg(long, default_value = "7")]
    refresh_ttl_days: i64,
}

fn resolve_secret(flag: Option<String>, env_var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(env_var).ok())
        .filter(|s| !s.trim().is_empty())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vidhive=info".parse()?))
        .init();

    let cli = Cli::parse();

    let Some(access_secret) = resolve_secret(cli.access_secret, "VIDHIVE_ACCESS_SECRET") else {
        bail!("No access token secret. Pass --access-secret or set VIDHIVE_ACCESS_SECRET.");
    };
    let Some(refresh_secret) = resolve_secret(cli.refresh_secret, "VIDHIVE_REFRESH_SECRET") else {
        bail!("No refresh token secret. Pass --refresh-secret or set VIDHIVE_REFRESH_SECRET.");
    };

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        data_dir: cli.data_dir.into(),
    };

    fs::create_dir_all(&config.data_dir)?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    let auth = AuthConfig {
        access_secret,
        refresh_secret,
        access_ttl_minutes: cli.access_ttl_minutes,
        refresh_ttl_days: cli.refresh_ttl_days,
    };

    let state = Arc::new(AppState::new(Arc::new(store), auth));

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
