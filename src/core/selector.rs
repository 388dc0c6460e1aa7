// selector.rs - Combination record selection with drug-order swap

use crate::data::{DoseResponseRecord, DoseResponseTable};
use crate::error::{Result, SynergyError};

/// Paired-dose records for one (sample, drug1, drug2) triple.
///
/// `drug1`/`drug2` are the final orientation: when the table only holds the
/// pair as (drug2, drug1) they are swapped and `swapped` is set, and every
/// downstream lookup must use this orientation.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub combo: Vec<&'a DoseResponseRecord>,
    pub drug1: String,
    pub drug2: String,
    pub swapped: bool,
    /// Study of the first combination record; single-agent baselines come from it.
    pub study: String,
}

fn combination_records<'a>(
    table: &'a DoseResponseTable,
    sample: &str,
    drug1: &str,
    drug2: &str,
) -> Vec<&'a DoseResponseRecord> {
    table
        .iter()
        .filter(|r| r.sample == sample && r.drug1 == drug1 && r.drug2.as_deref() == Some(drug2))
        .collect()
}

/// Select the combination subset for a resolved triple, trying both drug orders.
pub fn select<'a>(
    sample: &str,
    drug1: &str,
    drug2: &str,
    table: &'a DoseResponseTable,
) -> Result<Selection<'a>> {
    let direct = combination_records(table, sample, drug1, drug2);
    let (combo, first, second, swapped) = if !direct.is_empty() {
        (direct, drug1, drug2, false)
    } else {
        (combination_records(table, sample, drug2, drug1), drug2, drug1, true)
    };

    let study = match combo.first() {
        Some(record) => record.study.clone(),
        None => {
            // query order, not the swapped one
            return Err(SynergyError::NoCombinationData {
                sample: sample.to_string(),
                drug1: drug1.to_string(),
                drug2: drug2.to_string(),
            })
        }
    };

    Ok(Selection {
        combo,
        drug1: first.to_string(),
        drug2: second.to_string(),
        swapped,
        study,
    })
}
