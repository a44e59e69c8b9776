use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the YAML expert catalogue read once at startup.
    pub catalogue_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue_path: PathBuf::from("catalogue/experts.yaml"),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os("MINDCARE_CONFIG") {
            PathBuf::from(config_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mindcare")
                .join("config.yaml")
        }
    }

    pub fn with_catalogue_path(mut self, catalogue_path: PathBuf) -> Self {
        self.catalogue_path = catalogue_path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_default_points_at_bundled_catalogue() {
        let config = Config::default();
        assert_eq!(config.catalogue_path, PathBuf::from("catalogue/experts.yaml"));
    }

    #[test]
    fn config_loads_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(&config_path, "catalogue_path: /etc/mindcare/experts.yaml\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.catalogue_path,
            PathBuf::from("/etc/mindcare/experts.yaml")
        );
    }

    #[test]
    fn config_load_returns_default_when_file_missing() {
        let config = Config::load(Some(PathBuf::from("/nonexistent/config.yaml"))).unwrap();
        assert_eq!(config.catalogue_path, PathBuf::from("catalogue/experts.yaml"));
    }

    #[test]
    fn config_load_rejects_malformed_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "catalogue_path: [not, a, path").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn config_with_catalogue_path_overrides() {
        let config = Config::default().with_catalogue_path(PathBuf::from("/tmp/experts.yaml"));
        assert_eq!(config.catalogue_path, PathBuf::from("/tmp/experts.yaml"));
    }

    #[test]
    fn config_serializes_to_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("catalogue_path"));
    }
}
