// resolver.rs - Cell and drug name resolution

use crate::data::{CellRecord, CellTable, DrugTable};
use crate::error::{Result, SynergyError};

/// Prefix carried by canonical drug identifiers; such inputs bypass lookup.
pub const DRUG_ID_PREFIX: &str = "NSC.";

fn cell_columns(record: &CellRecord) -> [&str; 3] {
    [
        record.id.as_str(),
        record.short_name.as_str(),
        record.display_name.as_str(),
    ]
}

/// Resolve a cell line name to its canonical sample identifier.
///
/// Two ordered passes over the table, both case-insensitive against the
/// canonical ID, short name and display name columns: exact equality first,
/// then substring containment. The first matching row in table order wins.
pub fn resolve_cell(name: &str, cells: &CellTable) -> Result<String> {
    let needle = name.to_uppercase();

    let exact = cells.records.iter().find(|record| {
        cell_columns(record)
            .iter()
            .any(|column| column.to_uppercase() == needle)
    });
    if let Some(record) = exact {
        return Ok(record.id.clone());
    }

    cells
        .records
        .iter()
        .find(|record| {
            cell_columns(record)
                .iter()
                .any(|column| column.to_uppercase().contains(&needle))
        })
        .map(|record| record.id.clone())
        .ok_or_else(|| SynergyError::cell_not_found(name))
}

/// Resolve a drug name to its canonical identifier.
///
/// Identifiers already starting with [`DRUG_ID_PREFIX`] are returned
/// unchanged; anything else must equal a drug name, ignoring case.
pub fn resolve_drug(name: &str, drugs: &DrugTable) -> Result<String> {
    if name.starts_with(DRUG_ID_PREFIX) {
        return Ok(name.to_string());
    }

    let needle = name.to_lowercase();
    drugs
        .records
        .iter()
        .find(|record| record.name.to_lowercase() == needle)
        .map(|record| record.id.clone())
        .ok_or_else(|| SynergyError::drug_not_found(name))
}
