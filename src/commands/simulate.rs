use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use serde_json::json;

use crate::models::{ProgressUpdate, SessionType};
use crate::session::SessionStore;

#[derive(Parser)]
pub struct Args {
    /// Expert to conduct the session
    pub expert_id: String,

    /// Client identifier
    pub client_id: String,

    /// Session type to run
    #[arg(long, default_value = "initial_assessment")]
    pub session_type: SessionType,

    /// Initial focus for the session
    #[arg(long, default_value = "intake")]
    pub focus: String,

    /// Catalogue file to read instead of the configured one
    #[arg(long)]
    pub catalogue: Option<PathBuf>,
}

/// Run one scripted session against an in-memory store so the full
/// workflow (qualification check, start, progress, closure, history) can
/// be exercised from the command line.
pub async fn execute(args: Args) -> Result<()> {
    let registry = super::load_registry(args.catalogue).await?;

    if !registry.can_start(&args.expert_id, args.session_type)? {
        let expert = registry.get(&args.expert_id)?;
        bail!(
            "Expert {} cannot handle {} sessions",
            expert.name,
            args.session_type
        );
    }

    let mut store = SessionStore::new();
    let session = store.start_session(
        args.expert_id.as_str(),
        args.client_id.as_str(),
        args.session_type,
        args.focus.as_str(),
    );
    println!("started session {}", session.session_id);

    store.update_progress(
        &session.session_id,
        ProgressUpdate::note("focus discussed, baseline recorded").with_risk_level(1),
    )?;
    store.update_treatment_goals(
        &args.client_id,
        vec![format!("continue work on {}", args.focus)],
    );
    store.add_risk_assessment(&args.client_id, json!({ "severity": "low" }));
    store.update_progress_metric(&args.client_id, "engagement", 1.0);

    let closed = store.end_session(&session.session_id, "scripted session complete")?;
    println!(
        "closed session {} after {} note(s), risk level {}",
        closed.session_id,
        closed.progress_notes.len(),
        closed.risk_level
    );

    let history = store.client_history(&args.client_id)?;
    println!(
        "history for {}: {} session(s), {} goal(s), {} assessment(s), {} metric(s)",
        history.client_id,
        history.sessions.len(),
        history.treatment_goals.len(),
        history.risk_assessments.len(),
        history.progress_metrics.len()
    );

    Ok(())
}
