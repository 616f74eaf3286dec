use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use std::path::Path;
use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Log overwrites whose surviving record has no differing fields.
    pub log_unchanged_overwrites: bool,
    pub json_indent: usize,
    pub verbosity: String,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            log_unchanged_overwrites: true,
            json_indent: DEFAULT_JSON_INDENT,
            verbosity: DEFAULT_VERBOSITY.to_string(),
        }
    }
}

impl DedupConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.json_indent > MAX_JSON_INDENT {
            return Err(anyhow::anyhow!(
                "JSON indent must be at most {} spaces",
                MAX_JSON_INDENT
            ));
        }

        if !VERBOSITY_LEVELS.contains(&self.verbosity.as_str()) {
            return Err(anyhow::anyhow!(
                "verbosity must be one of: {}",
                VERBOSITY_LEVELS.join(", ")
            ));
        }

        Ok(())
    }
}
