// lib.rs - combosyn library root

//! # combosyn - Drug-combination synergy from dose-response screening data
//!
//! Given a cell line and two drugs, this library pulls the paired-dose and
//! single-agent growth measurements out of a combined dose-response table
//! (NCI ALMANAC layout), derives the expected additive growth for every dose
//! pair and compares it with the observed combined growth.
//!
//! ## Features
//!
//! - **Name resolution**: cell lines by ID, short or display name (exact, then substring);
//!   drugs by name or canonical `NSC.` identifier
//! - **Order-agnostic pairs**: a pair stored as (B, A) is found when querying (A, B)
//! - **Study-aligned baselines**: single-agent growth comes from the combination's study,
//!   with cross-study replicate statistics alongside
//! - **Matrix reports**: growth, expected growth and synergy score on the dose grid;
//!   TSV, CSV and JSON output
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use combosyn::prelude::*;
//! use std::path::Path;
//!
//! let response = DoseResponseTable::from_file(Path::new("combined_drug_growth.ALMANAC"))?;
//! let cells = CellTable::from_file(Path::new("NCI60_cells"))?;
//! let drugs = DrugTable::from_file(Path::new("ALMANAC_drugs"))?;
//!
//! let data = load_data("MDA-MB-468", "Nilotinib", "Paclitaxel", &response, &cells, &drugs)?;
//! let matrices = SynergyMatrices::from_combination(&data)?;
//! println!("{}", render_report(&data, &matrices));
//! # Ok::<(), combosyn::SynergyError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, ValidationResult};
    pub use crate::core::{combo_score, expected_growth, load_data};
    pub use crate::core::{ComboRow, LoadedCombination, SingleAgentTable, SynergyMatrices};
    pub use crate::data::{CellTable, Dose, DoseResponseRecord, DoseResponseTable, DrugTable};
    pub use crate::error::{Result, SynergyError};
    pub use crate::output::{render_report, write_report, OutputFormat};
}

// Re-export main types at the root level for convenience
pub use crate::core::{combo_score, expected_growth, load_data, LoadedCombination, SynergyMatrices};
pub use data::{CellTable, Dose, DoseResponseTable, DrugTable};
pub use error::{Result, SynergyError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "combosyn v{} - Drug-combination synergy from dose-response screens",
        VERSION
    )
}
