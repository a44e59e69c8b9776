use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod experts;
mod models;
mod session;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Experts(args) => commands::experts::execute(args).await,
        Commands::Show(args) => commands::show::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args).await,
        Commands::Simulate(args) => commands::simulate::execute(args).await,
    }
}
