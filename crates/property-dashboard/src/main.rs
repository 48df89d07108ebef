use anyhow::Result;
use clap::Parser;
use property_dashboard::config::{Cli, Command};
use property_dashboard::{cli, logging, routes};

#[tokio::main]
async fn main() -> Result<()> {
    logging::setup_logging();
    match Cli::parse().into_command() {
        Command::Serve(args) => routes::serve(&args).await,
        Command::Clean(args) => cli::run_clean(&args),
    }
}
