use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use kindred_core::{Config, CoreError};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kindred", version, about = "Kindred CLI")]
struct Cli {
    /// Run against a JSON fixture file instead of the REST backend
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Notification timing
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Message, action and date suggestions
    Suggest {
        #[command(subcommand)]
        action: commands::suggest::SuggestAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn connect(fixture: Option<&Path>) -> Result<(Config, commands::Backend), CoreError> {
    let config = Config::load_or_default();
    let backend = commands::Backend::build(fixture, &config)?;
    Ok((config, backend))
}

async fn dispatch(cli: Cli) -> commands::CommandResult {
    let fixture = cli.fixture.as_deref();
    match cli.command {
        Commands::Schedule { action } => {
            let (config, backend) = connect(fixture)?;
            commands::schedule::run(action, &backend, &config).await
        }
        Commands::Suggest { action } => {
            let (config, backend) = connect(fixture)?;
            commands::suggest::run(action, &backend, &config).await
        }
        Commands::Config { action } => commands::config::run(action),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
