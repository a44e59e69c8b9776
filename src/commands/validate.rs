use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
pub struct Args {
    /// Catalogue file to validate instead of the configured one
    #[arg(long)]
    pub catalogue: Option<PathBuf>,
}

pub async fn execute(args: Args) -> Result<()> {
    let registry = super::load_registry(args.catalogue).await?;

    println!("Catalogue OK: {} expert(s).", registry.len());
    for expert in registry.all() {
        println!(
            "  {} - {} session type(s), {} specialization(s)",
            expert.id,
            expert.session_protocols.len(),
            expert.specializations.len()
        );
    }

    Ok(())
}
