// merge.rs - Merge configuration file with CLI arguments

use crate::cli::args::{
    DEFAULT_CELL, DEFAULT_DRUG1, DEFAULT_DRUG2, DEFAULT_FORMAT, DEFAULT_LOG_LEVEL,
};
use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input tables
        if self.response.is_none() {
            self.response = config.response;
        }
        if self.cells.is_none() {
            self.cells = config.cells;
        }
        if self.drugs.is_none() {
            self.drugs = config.drugs;
        }

        // Query (positionals are all-or-nothing; the config fills gaps with defaults)
        if self.query.is_empty()
            && (config.cell.is_some() || config.drug1.is_some() || config.drug2.is_some())
        {
            self.query = vec![
                config.cell.unwrap_or_else(|| DEFAULT_CELL.to_string()),
                config.drug1.unwrap_or_else(|| DEFAULT_DRUG1.to_string()),
                config.drug2.unwrap_or_else(|| DEFAULT_DRUG2.to_string()),
            ];
        }

        // Output (only override defaults, not explicit CLI values)
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.format == DEFAULT_FORMAT {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.log_level == DEFAULT_LOG_LEVEL {
            if let Some(level) = config.log_level {
                self.log_level = level;
            }
        }

        // Flags
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    #[test]
    fn test_cli_values_win_over_config() {
        let args = Args::from_args(
            &["combosyn"],
            &["--format", "csv", "HOP-62", "Nilotinib", "Paclitaxel"],
        )
        .unwrap();
        let config = Config {
            cell: Some("A549".to_string()),
            drug1: Some("Imatinib".to_string()),
            format: Some("json".to_string()),
            cells: Some("cells.tsv".to_string()),
            dry_run: Some(true),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.query().unwrap(), ("HOP-62", "Nilotinib", "Paclitaxel"));
        assert_eq!(merged.format, "csv");
        assert_eq!(merged.cells_path(), "cells.tsv");
        assert!(merged.dry_run);
    }

    #[test]
    fn test_config_query_fills_from_defaults() {
        let args = Args::from_args(&["combosyn"], &[]).unwrap();
        let config = Config {
            cell: Some("A549".to_string()),
            drug2: Some("Imatinib".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.query().unwrap(), ("A549", DEFAULT_DRUG1, "Imatinib"));
    }

    #[test]
    fn test_config_replaces_defaults() {
        let args = Args::from_args(&["combosyn"], &[]).unwrap();
        let config = Config {
            format: Some("json".to_string()),
            log_level: Some("debug".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.format, "json");
        assert_eq!(merged.log_level, "debug");
        assert!(!merged.dry_run);
    }
}
