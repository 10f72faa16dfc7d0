//! Engine configuration
//!
//! Holds the few knobs the engine needs: projection horizon, report sizes,
//! the fallback category label and the essential category set. Currency and
//! display preferences are not part of it.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the override in the data dir
//!    (~/.local/share/poupa/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override file take their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::CategoryKind;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// A category seeded for new users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultCategory {
    pub name: String,
    pub kind: CategoryKind,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Months covered by a goal projection
    pub horizon_months: u32,
    /// Length of the top expense categories list
    pub top_categories: usize,
    /// Months in the dashboard balance window
    pub dashboard_months: u32,
    /// Label for transactions whose category does not resolve
    pub fallback_category: String,
    /// Category names counted as essential (exact match)
    pub essential_categories: Vec<String>,
    /// Categories created for a user with none
    pub default_categories: Vec<DefaultCategory>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let seed = |name: &str, kind: CategoryKind| DefaultCategory {
            name: name.to_string(),
            kind,
        };

        Self {
            horizon_months: 12,
            top_categories: 10,
            dashboard_months: 6,
            fallback_category: "Other".to_string(),
            essential_categories: ["Moradia", "Alimentacao", "Saude", "Transporte"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_categories: vec![
                seed("Alimentacao", CategoryKind::Expense),
                seed("Transporte", CategoryKind::Expense),
                seed("Moradia", CategoryKind::Expense),
                seed("Saude", CategoryKind::Expense),
                seed("Lazer", CategoryKind::Expense),
                seed("Educacao", CategoryKind::Expense),
                seed("Outros", CategoryKind::Expense),
                seed("Salario", CategoryKind::Income),
                seed("Freelance", CategoryKind::Income),
            ],
        }
    }
}

impl EngineConfig {
    /// Load config, preferring `path` (if it exists), then the data dir
    /// override, then the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        match override_path {
            Some(p) if p.exists() => {
                let content = fs::read_to_string(&p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?;
                let config = Self::from_toml_str(&content)?;
                info!("Loaded engine config from {}", p.display());
                Ok(config)
            }
            _ => {
                debug!("Using embedded engine config");
                Self::embedded()
            }
        }
    }

    /// The defaults compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.horizon_months == 0 {
            return Err(Error::Config("horizon_months must be at least 1".into()));
        }
        if self.top_categories == 0 {
            return Err(Error::Config("top_categories must be at least 1".into()));
        }
        if self.dashboard_months == 0 {
            return Err(Error::Config("dashboard_months must be at least 1".into()));
        }
        Ok(())
    }

    /// Whether a category name belongs to the essential set
    pub fn is_essential(&self, category_name: &str) -> bool {
        is_essential_name(&self.essential_categories, category_name)
    }
}

/// Exact, case-sensitive membership of a category name in an essential set
pub fn is_essential_name(essential: &[String], category_name: &str) -> bool {
    essential.iter().any(|name| name == category_name)
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("poupa").join("config").join("engine.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_default() {
        let embedded = EngineConfig::embedded().unwrap();
        assert_eq!(embedded, EngineConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = EngineConfig::from_toml_str("top_categories = 5\n").unwrap();
        assert_eq!(config.top_categories, 5);
        assert_eq!(config.horizon_months, 12);
        assert_eq!(config.fallback_category, "Other");
        assert_eq!(config.essential_categories.len(), 4);
    }

    #[test]
    fn test_zero_horizon_is_rejected() {
        let err = EngineConfig::from_toml_str("horizon_months = 0\n").unwrap_err();
        assert!(err.to_string().contains("horizon_months"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("horizon_months = \"twelve\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fallback_category = \"Outros\"").unwrap();
        writeln!(file, "essential_categories = [\"Moradia\"]").unwrap();

        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.fallback_category, "Outros");
        assert!(config.is_essential("Moradia"));
        assert!(!config.is_essential("Saude"));
    }

    #[test]
    fn test_load_missing_path_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_essential_match_is_case_sensitive() {
        let config = EngineConfig::default();
        assert!(config.is_essential("Moradia"));
        assert!(!config.is_essential("moradia"));
        assert!(!config.is_essential("Moradia "));
    }

    #[test]
    fn test_essential_name_predicate() {
        let essential = vec!["Saude".to_string(), "Transporte".to_string()];
        assert!(is_essential_name(&essential, "Saude"));
        assert!(!is_essential_name(&essential, "saude"));
        assert!(!is_essential_name(&[], "Saude"));
    }
}
