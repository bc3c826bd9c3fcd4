//! Pipeline tuning knobs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings shared by ingest and ask.
///
/// Every field has a default, so a TOML file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Target segment size in characters
    pub chunk_size: usize,
    /// Overlap budget in characters; one carried word per five characters
    pub chunk_overlap: usize,
    /// Maximum number of vocabulary terms per document
    pub max_vocabulary: usize,
    /// Number of segments handed to the completion endpoint
    pub top_k: usize,
    /// Upper bound on the context characters embedded in the prompt
    pub max_context_chars: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 150,
            max_vocabulary: 500,
            top_k: 3,
            max_context_chars: 4000,
        }
    }
}

impl RagConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::InvalidInput(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidInput(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that would make the pipeline degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidInput("chunk_size must be positive".into()));
        }
        if self.max_vocabulary == 0 {
            return Err(Error::InvalidInput("max_vocabulary must be positive".into()));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidInput("top_k must be positive".into()));
        }
        Ok(())
    }
}
