//! Station Desk
//!
//! Interactive terminal front-end for the station check-in tracker:
//! - `run` (default): the interactive shell
//! - `status`: show the persisted session
//! - `config`: print or write the default configuration

use anyhow::Context;
use clap::{Parser, Subcommand};
use stationdesk::config::{generate_default_config, Config};
use stationdesk::shell::progress_line;
use stationdesk::{
    App, FileStore, KeyValueStore, MemoryStore, NullSink, Reply, Session, SessionStore, Shell,
    TrainingSnapshot, TrainingState,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stationdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Station check-in/check-out tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overriding the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell
    Run,

    /// Show the persisted session
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config, cli.ephemeral).await,
        Commands::Status => status(&config),
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("stationdesk={}", config.logging.level))
    });

    // Logs go to stderr so they don't interleave with the rendered pages
    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_storage(config: &Config, ephemeral: bool) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if ephemeral {
        tracing::info!("Using in-memory storage");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let dir = config.storage.data_path();
    let store = FileStore::open(&dir).with_context(|| format!("opening storage in {:?}", dir))?;
    tracing::info!("Data directory: {:?}", dir);
    Ok(Arc::new(store))
}

async fn run(config: &Config, ephemeral: bool) -> anyhow::Result<()> {
    tracing::info!("Station Desk v{}", env!("CARGO_PKG_VERSION"));

    if config.backend.is_configured() {
        tracing::info!("Backend endpoint configured (not used)");
    } else {
        tracing::debug!("No backend endpoint configured");
    }

    let storage = open_storage(config, ephemeral)?;
    let session = Arc::new(SessionStore::open(storage, config.session_config())?);
    let app = App::new(session, Arc::new(NullSink), config.training_config()).await;

    run_shell(Shell::new(app)).await?;

    tracing::info!("Station Desk shutdown complete");
    Ok(())
}

async fn run_shell(mut shell: Shell) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", shell.screen().await);
    println!("Type 'help' for commands.");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut updates = shell.app().training_updates();

        let reply = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => Some(shell.handle_line(&line).await),
                // End of input
                None => Some(Reply::Quit),
            },
            Some(snapshot) = next_snapshot(&mut updates) => {
                if snapshot.state == TrainingState::Processing {
                    println!("\r{}", progress_line(&snapshot));
                    None
                } else {
                    Some(Reply::Render)
                }
            }
        };

        match reply {
            Some(Reply::Render) => println!("\n{}", shell.screen().await),
            Some(Reply::Message(message)) => println!("{}", message),
            Some(Reply::Quit) => break,
            None => {}
        }
    }

    println!();
    Ok(())
}

/// Next training snapshot, or pending forever when the setup page is closed
async fn next_snapshot(
    updates: &mut Option<watch::Receiver<TrainingSnapshot>>,
) -> Option<TrainingSnapshot> {
    match updates {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}

fn status(config: &Config) -> anyhow::Result<()> {
    let dir = config.storage.data_path();
    let store = FileStore::open(&dir).with_context(|| format!("opening storage in {:?}", dir))?;

    println!("Station Desk v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Data directory: {:?}", dir);

    match store.get(&config.storage.session_key)? {
        Some(blob) => match serde_json::from_str::<Session>(&blob) {
            Ok(session) => {
                println!("Signed in as: {}", session.display_name());
                println!("  User ID: {}", session.user_id);
                if let Some(email) = &session.email {
                    println!("  Email: {}", email);
                }
                println!("  Since: {}", session.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            Err(e) => println!("Stored session is unreadable: {}", e),
        },
        None => println!("Not signed in"),
    }

    Ok(())
}
