// response.rs - Dose-response table loader

use super::{open_table, present};
use crate::data::records::{Dose, DoseResponseRecord, DoseResponseTable};
use crate::error::{Result, SynergyError};
use serde::Deserialize;
use std::path::Path;

/// Row as it appears on disk; upstream files use upper-case headers.
#[derive(Debug, Deserialize)]
struct RawResponseRow {
    #[serde(rename = "SOURCE", alias = "Source")]
    source: String,
    #[serde(rename = "CELL", alias = "Sample")]
    sample: String,
    #[serde(rename = "DRUG1", alias = "Drug1")]
    drug1: String,
    #[serde(rename = "DRUG2", alias = "Drug2")]
    drug2: Option<String>,
    #[serde(rename = "DOSE1", alias = "Dose1")]
    dose1: String,
    #[serde(rename = "DOSE2", alias = "Dose2")]
    dose2: Option<String>,
    #[serde(rename = "GROWTH", alias = "Growth")]
    growth: String,
    #[serde(rename = "STUDY", alias = "Study")]
    study: String,
}

fn parse_dose(raw: &str, path: &Path, line: u64, column: &'static str) -> Result<Dose> {
    raw.parse::<Dose>().map_err(|_| SynergyError::Parse {
        file: path.to_path_buf(),
        line,
        column,
        value: raw.to_string(),
    })
}

impl RawResponseRow {
    fn into_record(self, path: &Path, line: u64) -> Result<DoseResponseRecord> {
        let dose1 = parse_dose(&self.dose1, path, line, "Dose1")?;
        let growth = self
            .growth
            .trim()
            .parse::<f64>()
            .map_err(|_| SynergyError::Parse {
                file: path.to_path_buf(),
                line,
                column: "Growth",
                value: self.growth.clone(),
            })?;

        let (drug2, dose2) = match (present(self.drug2), present(self.dose2)) {
            (Some(drug), Some(dose)) => (Some(drug), Some(parse_dose(&dose, path, line, "Dose2")?)),
            (None, None) => (None, None),
            (Some(drug), None) => {
                return Err(SynergyError::Parse {
                    file: path.to_path_buf(),
                    line,
                    column: "Dose2",
                    value: format!("<missing for {}>", drug),
                })
            }
            (None, Some(dose)) => {
                return Err(SynergyError::Parse {
                    file: path.to_path_buf(),
                    line,
                    column: "Drug2",
                    value: format!("<missing for dose {}>", dose),
                })
            }
        };

        Ok(DoseResponseRecord {
            source: self.source,
            sample: self.sample,
            drug1: self.drug1,
            drug2,
            dose1,
            dose2,
            growth,
            study: self.study,
        })
    }
}

impl DoseResponseTable {
    /// Load the combined dose-response table (tab separated unless `.csv`).
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading dose-response table");
        let mut reader = open_table(path)?;
        let mut records = Vec::new();

        for (idx, row) in reader.deserialize::<RawResponseRow>().enumerate() {
            // header is line 1
            let line = idx as u64 + 2;
            records.push(row?.into_record(path, line)?);
        }

        let table = DoseResponseTable::new(records);
        let single = table.iter().filter(|r| r.is_single_agent()).count();
        tracing::info!(
            records = table.len(),
            single_agent = single,
            combination = table.len() - single,
            "dose-response table loaded"
        );
        Ok(table)
    }
}
