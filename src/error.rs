// error.rs - Error taxonomy for loading, resolution and scoring

use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SynergyError>;

/// Errors raised while loading tables, resolving identifiers or scoring a combination.
#[derive(Debug, Error)]
pub enum SynergyError {
    /// A cell or drug name matched no row of its reference table.
    #[error("{kind} not found: '{name}'")]
    NotFound { kind: &'static str, name: String },

    /// No paired-dose records exist for the triple, in either drug order.
    #[error("no combination data for sample {sample} with {drug1} + {drug2} (either order)")]
    NoCombinationData {
        sample: String,
        drug1: String,
        drug2: String,
    },

    /// A dose used in the combination has no single-agent growth in the matched study.
    #[error("no single-agent reference growth for {drug} at dose {dose} in study {study}")]
    MissingDoseReference {
        drug: String,
        dose: f64,
        study: String,
    },

    /// A paired-dose record names a second drug but carries no second dose.
    #[error("combination record for {sample} with {drug1} + {drug2} at dose {dose1} has no second dose (study {study})")]
    IncompleteCombination {
        sample: String,
        drug1: String,
        drug2: String,
        dose1: f64,
        study: String,
    },

    /// Combination records do not tile the single-agent dose grid.
    #[error("cannot arrange {records} combination records into a {rows}x{cols} dose matrix: {reason}")]
    MatrixShape {
        rows: usize,
        cols: usize,
        records: usize,
        reason: String,
    },

    /// A field in an input table could not be interpreted.
    #[error("{file}:{line}: invalid {column} value '{value}'")]
    Parse {
        file: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },

    /// Raised when command line or configuration values are inconsistent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Raised when a configuration file cannot be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl SynergyError {
    pub(crate) fn cell_not_found(name: &str) -> Self {
        SynergyError::NotFound {
            kind: "cell",
            name: name.to_string(),
        }
    }

    pub(crate) fn drug_not_found(name: &str) -> Self {
        SynergyError::NotFound {
            kind: "drug",
            name: name.to_string(),
        }
    }
}
