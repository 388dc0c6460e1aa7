// mod.rs - Delimited table loaders

pub mod reference;
pub mod response;

use crate::error::{Result, SynergyError};
use std::path::Path;

/// Markers treated as an absent value in optional columns.
const MISSING_MARKERS: [&str; 4] = ["NA", "NaN", "nan", "null"];

/// Pick the field delimiter from the file extension.
///
/// `.csv` files are comma separated; everything else (including the
/// extension-less upstream files such as `NCI60_cells`) is tab separated.
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("csv") => b',',
        _ => b'\t',
    }
}

/// Open a headed delimited file for serde deserialization.
pub(crate) fn open_table(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(SynergyError::MissingInput(path.to_path_buf()));
    }
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    Ok(reader)
}

/// Normalise an optional text field, mapping empty and NA-like values to `None`.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !MISSING_MARKERS.contains(&v)
    })
}
