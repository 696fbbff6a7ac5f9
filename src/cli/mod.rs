use crate::bus::{Broker, RedisBroker};
use crate::channels::{ChatPlatform, TelegramPlatform};
use crate::config::credentials::{ENV_OVERRIDES, detect_source};
use crate::config::{Config, load_config, load_dotenv};
use crate::relay::Relay;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "telebridge")]
#[command(about = "Relay between a Telegram bot and Redis pub/sub topics")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay until interrupted (default)
    Run {
        /// Path to config.json (default: ~/.telebridge/config.json)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Validate configuration and print it with secrets redacted
    Check {
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = load_dotenv()?;

    match cli.command.unwrap_or(Commands::Run { config: None }) {
        Commands::Run { config } => {
            let config = load_config(config.as_deref())?;
            init_tracing(config.telegram.debug);
            if let Some(path) = dotenv {
                debug!("loaded environment from {}", path.display());
            }
            relay(config).await
        }
        Commands::Check { config } => {
            let config = load_config(config.as_deref())?;
            check(&config);
            Ok(())
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins; otherwise `debug` raises this
/// crate's level.
fn init_tracing(debug: bool) {
    let default = if debug {
        "info,telebridge=debug,teloxide=warn"
    } else {
        "info,teloxide=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn relay(config: Config) -> Result<()> {
    info!("Configuration loaded");
    let broker: Arc<dyn Broker> = Arc::new(RedisBroker::connect(&config.redis.url).await?);
    let platform: Arc<dyn ChatPlatform> = Arc::new(
        TelegramPlatform::connect(config.telegram.clone(), config.relay.update_buffer).await?,
    );

    let commands = broker
        .subscribe(std::slice::from_ref(&config.topics.commands))
        .await?;
    let updates = platform.start().await?;

    let relay = Relay::new(
        platform,
        broker,
        config.topics.clone(),
        config.relay.publish_timeout(),
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
        result = relay.run(updates, commands) => result?,
    }

    Ok(())
}

fn check(config: &Config) {
    println!("Configuration is valid.\n");
    println!("{:#?}\n", config);
    println!("Sources:");
    for (name, var) in ENV_OVERRIDES {
        println!("  {:<16} {:<28} {}", name, var, detect_source(name, config));
    }
}
