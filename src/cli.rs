use clap::{Parser, Subcommand};

use crate::commands::{experts, show, simulate, validate};

#[derive(Parser)]
#[command(name = "mindcare")]
#[command(about = "Therapy session workflow engine - expert matching and client history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List experts in the catalogue, optionally filtered
    Experts(experts::Args),

    /// Show full detail for one expert
    Show(show::Args),

    /// Load the expert catalogue and report validation errors
    Validate(validate::Args),

    /// Run a scripted session workflow against an in-memory store
    Simulate(simulate::Args),
}
