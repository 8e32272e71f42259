//! cdmp-api - index read/write API server
//!
//! Serves per-user index documents to the player. `--issue-token <user>`
//! creates a bearer token and exits; `--revoke-token <token>` removes one.

use anyhow::{Context, Result};
use cdmp_api::{api::BuildInfo, build_router, AppState};
use cdmp_common::config::{
    prepare_root_folder, resolve_root_folder, TomlConfig, DEFAULT_PORT, ROOT_FOLDER_ENV,
};
use cdmp_common::db::{init_database, issue_token, revoke_token};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "cdmp-api")]
#[command(about = "Index read/write API for the cloud drive music player")]
#[command(version)]
struct Args {
    /// Root folder holding cdmp.db
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// HTTP listen port
    #[arg(short, long, env = "CDMP_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Issue a bearer token for this user id, print it, and exit
    #[arg(long, value_name = "USER_ID")]
    issue_token: Option<String>,

    /// Revoke a bearer token and exit
    #[arg(long, value_name = "TOKEN", conflicts_with = "issue_token")]
    revoke_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_default();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config
            .as_ref()
            .and_then(|c| c.log_level.as_deref())
            .unwrap_or("info");
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting {}", BuildInfo::current());

    let root_folder = resolve_root_folder(
        args.root_folder.as_deref(),
        ROOT_FOLDER_ENV,
        config.as_ref(),
    );
    info!("Root folder: {}", root_folder.display());
    let db_path = prepare_root_folder(&root_folder)
        .with_context(|| format!("Failed to prepare root folder {}", root_folder.display()))?;
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    if let Some(user_id) = args.issue_token {
        let token = issue_token(&pool, &user_id)
            .await
            .context("Failed to issue token")?;
        println!("{}", token);
        return Ok(());
    }

    if let Some(token) = args.revoke_token {
        let existed = revoke_token(&pool, &token)
            .await
            .context("Failed to revoke token")?;
        if existed {
            println!("Token revoked");
        } else {
            println!("Token not found");
        }
        return Ok(());
    }

    let port = args
        .port
        .or_else(|| config.as_ref().and_then(|c| c.port))
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(args.bind, port);

    let app = build_router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("cdmp-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
