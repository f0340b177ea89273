//! Microsoft Intune special agent
//!
//! Collects app licenses, Apple ADE tokens, the Apple MDM push certificate,
//! Apple VPP tokens and certificate connectors from Microsoft Graph and
//! prints them as agent sections on stdout.

use std::io;

use clap::Parser;

mod cli;
mod client;
mod collectors;
mod config;
mod error;
mod output;

use cli::Cli;
use config::FileSecretStore;
use error::Result;
use output::SectionWriter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    init_logging(args.debug);

    if let Err(err) = run(args).await {
        log::debug!("{:?}", err);
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `--debug`.
fn init_logging(debug: bool) {
    let default_filter = if debug { "ms_intune_agent=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

async fn run(args: Cli) -> Result<()> {
    let config = args.into_config(&FileSecretStore::new())?;
    log::debug!("Selected services: {:?}", config.services);

    let stdout = io::stdout();
    let mut writer = SectionWriter::new(stdout.lock());
    cli::run::run(&config, &mut writer).await
}
