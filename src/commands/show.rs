use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
pub struct Args {
    /// Id of the expert to display
    pub expert_id: String,

    /// Catalogue file to read instead of the configured one
    #[arg(long)]
    pub catalogue: Option<PathBuf>,
}

pub async fn execute(args: Args) -> Result<()> {
    let registry = super::load_registry(args.catalogue).await?;
    let expert = registry.get(&args.expert_id)?;

    println!("{} ({})", expert.name, expert.id);
    println!(
        "  specializations: {}",
        expert
            .specializations
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  approaches:      {}",
        expert
            .therapeutic_approaches
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if !expert.communication_style.is_empty() {
        println!("  style:           {}", expert.communication_style);
    }
    if !expert.ethical_guidelines.is_empty() {
        println!("  ethics:          {}", expert.ethical_guidelines);
    }
    println!("  session types:");
    for (session_type, protocol) in &expert.session_protocols {
        println!(
            "    {}: {}",
            session_type,
            serde_json::to_string(protocol)?
        );
    }

    Ok(())
}
