//! Configuration structures for the filtering pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{FacfilterError, Result};
use crate::invoice::ArithmeticMode;

/// Main configuration for the facfilter pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacfilterConfig {
    /// Input handling.
    pub input: InputConfig,

    /// Validation options.
    pub validation: ValidationConfig,

    /// Filter options.
    pub filter: FilterConfig,

    /// Output handling.
    pub output: OutputConfig,
}

/// Input handling configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Drop a single trailing line separator before parsing, so a final
    /// newline does not produce an empty record.
    pub trim_trailing_newline: bool,
}

/// Validation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accept rows with more columns than the schema (extra columns are ignored).
    pub allow_extra_columns: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allow_extra_columns: true,
        }
    }
}

/// Filter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Arithmetic used by the IVA/IGIC calculation checks.
    pub arithmetic: ArithmeticMode,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// End the output with a line separator.
    pub append_trailing_newline: bool,
}

impl FacfilterConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FacfilterError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FacfilterError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
