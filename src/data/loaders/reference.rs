// reference.rs - Cell line and drug reference table loaders

use super::open_table;
use crate::data::records::{CellRecord, CellTable, DrugRecord, DrugTable};
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawCellRow {
    #[serde(rename = "NCI60.ID")]
    id: String,
    #[serde(rename = "CELLNAME", default)]
    short_name: String,
    #[serde(rename = "Name", default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct RawDrugRow {
    #[serde(rename = "NSC.ID")]
    id: String,
    #[serde(rename = "Name", default)]
    name: String,
}

impl CellTable {
    /// Load the cell line table (`NCI60.ID`, `CELLNAME`, `Name`; extra columns ignored).
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut reader = open_table(path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<RawCellRow>() {
            let row = row?;
            records.push(CellRecord {
                id: row.id,
                short_name: row.short_name,
                display_name: row.display_name,
            });
        }
        tracing::info!(path = %path.display(), cells = records.len(), "cell table loaded");
        Ok(CellTable::new(records))
    }
}

impl DrugTable {
    /// Load the drug table (`NSC.ID`, `Name`; extra columns ignored).
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut reader = open_table(path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<RawDrugRow>() {
            let row = row?;
            records.push(DrugRecord {
                id: row.id,
                name: row.name,
            });
        }
        tracing::info!(path = %path.display(), drugs = records.len(), "drug table loaded");
        Ok(DrugTable::new(records))
    }
}
