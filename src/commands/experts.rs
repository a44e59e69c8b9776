use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::experts::ExpertFilter;
use crate::models::{SessionType, SpecializationArea, TherapeuticApproach};

#[derive(Parser)]
pub struct Args {
    /// Only experts certified in this specialization
    #[arg(long)]
    pub specialization: Option<SpecializationArea>,

    /// Only experts practicing this therapeutic approach
    #[arg(long)]
    pub approach: Option<TherapeuticApproach>,

    /// Only experts qualified for this session type
    #[arg(long)]
    pub session_type: Option<SessionType>,

    /// Catalogue file to read instead of the configured one
    #[arg(long)]
    pub catalogue: Option<PathBuf>,
}

pub async fn execute(args: Args) -> Result<()> {
    let registry = super::load_registry(args.catalogue).await?;

    let filter = ExpertFilter {
        specialization: args.specialization,
        approach: args.approach,
        session_type: args.session_type,
    };
    let experts = registry.filter(&filter);

    if experts.is_empty() {
        println!("No experts match the given filters.");
        return Ok(());
    }

    println!(
        "{:<14} {:<22} {:<34} {}",
        "ID", "NAME", "SPECIALIZATIONS", "SESSION TYPES"
    );
    println!("{}", "-".repeat(90));

    for expert in experts {
        let specializations = expert
            .specializations
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let session_types = expert
            .session_protocols
            .keys()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");

        println!(
            "{:<14} {:<22} {:<34} {}",
            expert.id, expert.name, specializations, session_types
        );
    }

    Ok(())
}
