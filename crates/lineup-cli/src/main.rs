use clap::{Parser, Subcommand};
use lineup_core::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lineup",
    about = "Element catalog service with batched selection mutations",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to a YAML config file (defaults apply when omitted)
    #[arg(long, global = true, env = "LINEUP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Number of catalog ids to seed at startup (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration as YAML
    Config,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Serve { port, seed } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(seed) = seed {
                config.seed_count = seed;
            }
            config.validate()?;

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(lineup_server::serve(&config))
        }
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}
