// config.rs - Configuration file support

use crate::error::{Result, SynergyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input tables
    pub response: Option<String>,
    pub cells: Option<String>,
    pub drugs: Option<String>,

    // Query
    pub cell: Option<String>,
    pub drug1: Option<String>,
    pub drug2: Option<String>,

    // Output
    pub output: Option<String>,
    pub format: Option<String>,
    pub log_level: Option<String>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SynergyError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            SynergyError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| SynergyError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            SynergyError::Config(format!("Failed to write config file '{}': {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# combosyn.toml - Configuration file for combosyn
# Command line arguments will override these settings

# =============================================================================
# INPUT TABLES (tab separated unless the file ends in .csv)
# =============================================================================

# Combined dose-response table
# (SOURCE, CELL, DRUG1, DRUG2, DOSE1, DOSE2, GROWTH, STUDY)
response = "combined_drug_growth.ALMANAC"

# Cell line table (NCI60.ID, CELLNAME, Name)
cells = "NCI60_cells"

# Drug table (NSC.ID, Name)
drugs = "ALMANAC_drugs"

# =============================================================================
# QUERY
# =============================================================================

# Cell line: canonical ID, short name or display name (substring match as fallback)
cell = "MDA-MB-468"

# Drugs: display name or NSC identifier (e.g. "NSC.747599")
drug1 = "Nilotinib"
drug2 = "Paclitaxel"

# =============================================================================
# OUTPUT
# =============================================================================

# Write the scored combination table to a file
# output = "synergy.tsv"

# Output format: tsv, csv, json
format = "tsv"

# Log level when RUST_LOG is unset
log_level = "info"

# =============================================================================
# FLAGS
# =============================================================================

# Resolve identifiers and select records without scoring
dry_run = false
"#
        .to_string()
    }
}
