use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Controls one offline ingestion run: which search terms to query, how many
/// results to request per term, and how many API calls the run may spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub search_terms: Vec<String>,
    #[serde(default = "default_max_items_per_term")]
    pub max_items_per_term: u32,
    #[serde(default = "default_max_total_requests")]
    pub max_total_requests: u32,
}

fn default_max_items_per_term() -> u32 {
    4
}

fn default_max_total_requests() -> u32 {
    10
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            search_terms: ["Dior", "Chanel", "Tom Ford", "Creed", "Guerlain"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_items_per_term: default_max_items_per_term(),
            max_total_requests: default_max_total_requests(),
        }
    }
}

/// Load and validate a seed configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed_config(path: &Path) -> Result<SeedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: SeedConfig = serde_yaml::from_str(&content)?;
    validate_seed_config(&config)?;

    Ok(config)
}

/// Validate a seed configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when there are no terms, a term is
/// blank or repeated (case-insensitively), or either cap is zero.
pub fn validate_seed_config(config: &SeedConfig) -> Result<(), ConfigError> {
    if config.search_terms.is_empty() {
        return Err(ConfigError::Validation(
            "at least one search term is required".to_string(),
        ));
    }

    if config.max_items_per_term == 0 {
        return Err(ConfigError::Validation(
            "max_items_per_term must be at least 1".to_string(),
        ));
    }

    if config.max_total_requests == 0 {
        return Err(ConfigError::Validation(
            "max_total_requests must be at least 1".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for term in &config.search_terms {
        if term.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search terms must be non-empty".to_string(),
            ));
        }
        if !seen.insert(term.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate search term: '{term}'"
            )));
        }
    }

    Ok(())
}
