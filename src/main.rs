//! SpendBook main entry point

use anyhow::Context;
use clap::Parser;
use spendbook_api::{start_server, AppState};
use spendbook_client::HttpBackend;
use spendbook_config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "spendbook")]
#[command(author = "SpendBook Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Web front end for the SpendBook personal finance tracker", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // details carry the suggestions for fixing the file
    let config = Config::load(args.config.clone())
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    let backend = Arc::new(HttpBackend::new(&config.backend).context("Failed to create backend client")?);
    log::info!(
        "Config loaded: backend={}, actor={}",
        backend.base_url(),
        config.session.actor_email
    );

    let state = AppState::new(config, backend.clone(), backend.clone(), backend);

    let rt = Runtime::new()?;
    rt.block_on(start_server(state)).context("Server error")?;

    Ok(())
}
