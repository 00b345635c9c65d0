use anyhow::{Context, Result};
use cidway_core::cli::conf::{self, ConfigCmd};
use cidway_core::conf::load_config;
use cidway_core::logging::init_logging;
use cidway_core::server;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "config/cidway.hcl";

#[derive(Parser, Debug)]
#[command(
    name = "cidway",
    version,
    about = "cidway: content-addressed file gateway for IPFS and Grove"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Run the cidway gateway (default)
    Run {
        /// Path to the cidway config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { cmd }) => conf::run(cmd),
        Some(Command::Run { config }) => run(&config),
        None => run(Path::new(DEFAULT_CONFIG)),
    }
}

fn run(config_path: &Path) -> Result<()> {
    init_logging();

    let cfg = load_config(config_path)
        .with_context(|| format!("failed to load cidway config {}", config_path.display()))?;

    server::run(cfg)
}
