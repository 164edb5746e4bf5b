//! Chat API - HTTP server and maintenance commands

use std::path::PathBuf;

use anyhow::Context;
use chat_core::api::health::{self, HealthStatus};
use chat_core::api::{AppState, router};
use chat_core::chat::ChatService;
use chat_core::config::Config;
use chat_core::storage::Database;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chat-api")]
#[command(author, version, about = "Chat and message service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve(ServeArgs),

    /// Apply pending database migrations
    Migrate {
        /// Database file (overrides config)
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,

    /// Run health check
    Doctor,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = self.database {
            config.database.path = database;
        }
    }
}

fn init_tracing(level: &str, quiet: bool) -> anyhow::Result<()> {
    let level = if quiet { "warn" } else { level };

    // RUST_LOG wins over the configured level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn")
            .add_directive(format!("chat_api={level}").parse()?)
            .add_directive(format!("chat_core={level}").parse()?),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&level, cli.quiet)?;

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => cmd_serve(config?, args).await,
        Commands::Migrate { database } => cmd_migrate(config?, database, cli.quiet).await,
        Commands::Config => cmd_config(&config?),
        Commands::Doctor => cmd_doctor(config, cli.quiet).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_serve(mut config: Config, args: ServeArgs) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;
    let addr = config.bind_addr()?;

    info!("Starting {}", config.service.name);
    info!("Log level: {}", config.logging.level);

    let db = Database::new(config.database_config()).await?;
    info!("Database: {}", db.path().display());

    let state = AppState::new(ChatService::new(db.clone()), config.service.name.as_str());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down {}", config.service.name);
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn cmd_migrate(
    mut config: Config,
    database: Option<PathBuf>,
    quiet: bool,
) -> anyhow::Result<()> {
    if let Some(database) = database {
        config.database.path = database;
    }

    let db = Database::new(config.database_config().no_migrate()).await?;
    let before = db.migration_status().await?;

    if before.needs_migration {
        db.migrate().await?;
    }
    let after = db.migration_status().await?;
    db.close().await;

    if !quiet {
        println!("Database: {}", db.path().display());
        if before.needs_migration {
            println!(
                "Migrated schema v{} -> v{}",
                before.current_version, after.current_version
            );
        } else {
            println!("Schema already at v{}", after.current_version);
        }
    }

    Ok(())
}

fn cmd_config(config: &Config) -> anyhow::Result<()> {
    for (key, value) in config.list()? {
        println!("{} = {}", key, value);
    }
    Ok(())
}

async fn cmd_doctor(config: anyhow::Result<Config>, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Chat API Health Check");
        println!("=====================");
        println!();
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            if !quiet {
                println!("[!!] Configuration: {:#}", e);
            }
            anyhow::bail!("Health check failed");
        }
    };

    let report = health::doctor(&config).await;

    if !quiet {
        for check in &report.checks {
            let marker = match check.status {
                HealthStatus::Ok => "[OK]",
                HealthStatus::Warning => "[??]",
                HealthStatus::Error => "[!!]",
            };
            match &check.message {
                Some(message) => println!("{} {}: {}", marker, check.name, message),
                None => println!("{} {}", marker, check.name),
            }
        }
        println!();
    }

    if report.overall_status == HealthStatus::Error {
        anyhow::bail!("Health check failed");
    }

    if !quiet {
        println!("All checks passed.");
    }
    Ok(())
}
