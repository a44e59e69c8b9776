pub mod experts;
pub mod show;
pub mod simulate;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::experts::ExpertRegistry;

/// Load the registry from an explicit catalogue path or from config.
pub async fn load_registry(catalogue: Option<PathBuf>) -> Result<ExpertRegistry> {
    let config = Config::load(None)?;
    let path = catalogue.unwrap_or(config.catalogue_path);
    ExpertRegistry::load(&path)
        .await
        .context("Failed to load expert catalogue")
}
