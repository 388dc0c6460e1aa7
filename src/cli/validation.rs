// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::error::{Result, SynergyError};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct ValidationResult {
    pub format: OutputFormat,
    pub response: PathBuf,
    pub cells: PathBuf,
    pub drugs: PathBuf,
    pub output: Option<PathBuf>,
    pub cell: String,
    pub drug1: String,
    pub drug2: String,
}

fn existing_file(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if !path.is_file() {
        return Err(SynergyError::MissingInput(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

fn non_empty(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SynergyError::InvalidArgument(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    let format = OutputFormat::from_str(&args.format)?;

    let (cell, drug1, drug2) = args.query()?;
    let cell = non_empty(cell, "cell")?;
    let drug1 = non_empty(drug1, "drug1")?;
    let drug2 = non_empty(drug2, "drug2")?;

    Ok(ValidationResult {
        format,
        response: existing_file(args.response_path())?,
        cells: existing_file(args.cells_path())?,
        drugs: existing_file(args.drugs_path())?,
        output: args.output.as_ref().map(PathBuf::from),
        cell,
        drug1,
        drug2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;
    use std::fs;
    use tempfile::tempdir;

    fn args_with_tables(dir: &Path, extra: &[&str]) -> Args {
        for name in ["response.tsv", "cells.tsv", "drugs.tsv"] {
            fs::write(dir.join(name), "").unwrap();
        }
        let response = dir.join("response.tsv").display().to_string();
        let cells = dir.join("cells.tsv").display().to_string();
        let drugs = dir.join("drugs.tsv").display().to_string();
        let mut argv: Vec<&str> = vec![
            "--response",
            response.as_str(),
            "--cells",
            cells.as_str(),
            "--drugs",
            drugs.as_str(),
        ];
        argv.extend_from_slice(extra);
        Args::from_args(&["combosyn"], &argv).unwrap()
    }

    #[test]
    fn test_valid_arguments() {
        let dir = tempdir().expect("temporary directory");
        let args = args_with_tables(dir.path(), &["--format", "json", "X", "A", "B"]);
        let result = validate_args(&args).unwrap();
        assert_eq!(result.format, OutputFormat::Json);
        assert_eq!(result.cell, "X");
        assert_eq!(result.drug2, "B");
        assert!(result.output.is_none());
    }

    #[test]
    fn test_unknown_format() {
        let dir = tempdir().expect("temporary directory");
        let args = args_with_tables(dir.path(), &["--format", "xlsx"]);
        assert!(matches!(validate_args(&args), Err(SynergyError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_table() {
        let args = Args::from_args(&["combosyn"], &["--response", "/nonexistent/response.tsv"])
            .unwrap();
        assert!(matches!(validate_args(&args), Err(SynergyError::MissingInput(_))));
    }

    #[test]
    fn test_query_needs_all_three_positionals() {
        let dir = tempdir().expect("temporary directory");
        let args = args_with_tables(dir.path(), &["X", "A"]);
        assert!(matches!(validate_args(&args), Err(SynergyError::InvalidArgument(_))));
    }

    #[test]
    fn test_blank_query_value() {
        let dir = tempdir().expect("temporary directory");
        let args = args_with_tables(dir.path(), &["X", " ", "B"]);
        assert!(matches!(validate_args(&args), Err(SynergyError::InvalidArgument(_))));
    }

    #[test]
    fn test_same_drug_name_is_left_to_resolution() {
        let dir = tempdir().expect("temporary directory");
        let args = args_with_tables(dir.path(), &["X", "Nilotinib", "nilotinib"]);
        let result = validate_args(&args).unwrap();
        assert_eq!(result.drug1, "Nilotinib");
        assert_eq!(result.drug2, "nilotinib");
    }
}
