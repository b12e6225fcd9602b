//! daisy-report - blog self-analysis report service
//!
//! `daisy-report [serve]` runs the HTTP service.
//! `daisy-report wait --blog-id N` polls a running service until the blog's
//! report is ready and prints its URL.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daisy_common::config::{ensure_root_folder, RootFolderResolver, ServiceConfig};
use daisy_common::db::init_database;
use daisy_report::poll::StatusPoller;
use daisy_report::{build_router, AppState};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "daisy-report", version, about = "Blog self-analysis report service")]
struct Cli {
    /// Folder holding daisy.db and daisy.toml
    #[arg(long, global = true)]
    root_folder: Option<PathBuf>,

    /// Listen port (overrides daisy.toml)
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Wait until a blog's report is ready
    Wait {
        /// Service base URL; defaults to the configured listen address
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        blog_id: i64,
        /// Give up after this many status checks
        #[arg(long)]
        max_attempts: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let root_folder = RootFolderResolver::new(cli.root_folder.clone()).resolve();
    let loaded = ServiceConfig::try_load(&root_folder);
    let mut config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => ServiceConfig::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }

    let default_level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    // Build identification goes out before any database work
    info!(
        "Starting Daisy report service (daisy-report) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", root_folder.display());
    match &loaded {
        Ok(Some(_)) => info!("Loaded service config from {}", root_folder.display()),
        Ok(None) => info!("No service config found; using defaults"),
        Err(e) => warn!("Ignoring invalid service config ({}); using defaults", e),
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(root_folder, config).await,
        Command::Wait {
            server,
            blog_id,
            max_attempts,
        } => {
            let server = server.unwrap_or_else(|| format!("http://{}", config.listen_address()));
            wait(&server, blog_id, max_attempts, &config).await
        }
    }
}

async fn serve(root_folder: PathBuf, config: ServiceConfig) -> Result<()> {
    ensure_root_folder(&root_folder)?;

    let db_path = config.database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    info!(ordering = ?config.ordering, "Post card ordering strategy");
    let state = AppState::new(pool, &config);
    let app = build_router(state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("daisy-report listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn wait(
    server: &str,
    blog_id: i64,
    max_attempts: Option<u32>,
    config: &ServiceConfig,
) -> Result<()> {
    let mut poller = StatusPoller::new(server, blog_id, config.poll);
    if let Some(attempts) = max_attempts {
        poller = poller.with_max_attempts(attempts);
    }

    info!("Polling {}", poller.status_url());
    let report_id = poller.wait_for_report().await?;
    println!("{}/report/{}", server.trim_end_matches('/'), report_id);

    Ok(())
}
