// args.rs - Command line arguments definition

use argh::FromArgs;

use crate::error::{Result, SynergyError};

pub const DEFAULT_RESPONSE: &str = "combined_drug_growth.ALMANAC";
pub const DEFAULT_CELLS: &str = "NCI60_cells";
pub const DEFAULT_DRUGS: &str = "ALMANAC_drugs";
pub const DEFAULT_FORMAT: &str = "tsv";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_CELL: &str = "MDA-MB-468";
pub const DEFAULT_DRUG1: &str = "Nilotinib";
pub const DEFAULT_DRUG2: &str = "Paclitaxel";

#[derive(FromArgs, Debug)]
/// combosyn - Drug-combination synergy from dose-response screens
pub struct Args {
    /// cell line, first drug and second drug; all three or none (default: MDA-MB-468 Nilotinib Paclitaxel)
    #[argh(positional)]
    pub query: Vec<String>,

    /// path to combined dose-response table (default: combined_drug_growth.ALMANAC)
    #[argh(option)]
    pub response: Option<String>,

    /// path to cell line table (default: NCI60_cells)
    #[argh(option)]
    pub cells: Option<String>,

    /// path to drug table (default: ALMANAC_drugs)
    #[argh(option)]
    pub drugs: Option<String>,

    /// write the scored combination table to this file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, json (default: tsv)
    #[argh(option, default = "DEFAULT_FORMAT.to_string()")]
    pub format: String,

    /// log level when RUST_LOG is unset: error, warn, info, debug, trace (default: info)
    #[argh(option, default = "DEFAULT_LOG_LEVEL.to_string()")]
    pub log_level: String,

    /// resolve identifiers and select records without scoring
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    pub fn response_path(&self) -> &str {
        self.response.as_deref().unwrap_or(DEFAULT_RESPONSE)
    }

    pub fn cells_path(&self) -> &str {
        self.cells.as_deref().unwrap_or(DEFAULT_CELLS)
    }

    pub fn drugs_path(&self) -> &str {
        self.drugs.as_deref().unwrap_or(DEFAULT_DRUGS)
    }

    /// The (cell, drug1, drug2) query, or the reference triple when none is given.
    pub fn query(&self) -> Result<(&str, &str, &str)> {
        match self.query.as_slice() {
            [] => Ok((DEFAULT_CELL, DEFAULT_DRUG1, DEFAULT_DRUG2)),
            [cell, drug1, drug2] => Ok((cell.as_str(), drug1.as_str(), drug2.as_str())),
            other => Err(SynergyError::InvalidArgument(format!(
                "expected cell, drug1 and drug2 (or none for the defaults), got {} value(s)",
                other.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positionals_and_defaults() {
        let args = Args::from_args(&["combosyn"], &["SK-MEL-28", "NSC.733504", "NSC.226080"])
            .expect("arguments parse");
        assert_eq!(args.query().unwrap(), ("SK-MEL-28", "NSC.733504", "NSC.226080"));
        assert_eq!(args.format, DEFAULT_FORMAT);
        assert_eq!(args.response_path(), DEFAULT_RESPONSE);

        let args = Args::from_args(&["combosyn"], &[]).expect("arguments parse");
        assert_eq!(args.query().unwrap(), (DEFAULT_CELL, DEFAULT_DRUG1, DEFAULT_DRUG2));
        assert_eq!(args.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_partial_query_is_rejected() {
        for argv in [&["A549"][..], &["A549", "Nilotinib"][..], &["A", "B", "C", "D"][..]] {
            let args = Args::from_args(&["combosyn"], argv).expect("arguments parse");
            assert!(matches!(args.query(), Err(SynergyError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_options() {
        let args = Args::from_args(
            &["combosyn"],
            &["--cells", "cells.tsv", "--format", "json", "--dry-run", "A549", "NSC.1", "NSC.2"],
        )
        .expect("arguments parse");
        assert_eq!(args.cells_path(), "cells.tsv");
        assert_eq!(args.format, "json");
        assert!(args.dry_run);
        assert_eq!(args.query().unwrap().0, "A549");
    }
}
