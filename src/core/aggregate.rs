// aggregate.rs - Single-agent dose alignment and per-dose statistics

use crate::data::{Dose, DoseResponseRecord, DoseResponseTable};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Replicate statistics for one dose, across every study that measured it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDoseStat {
    pub dose: Dose,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two replicates.
    pub std: Option<f64>,
    pub count: usize,
}

/// A study-specific single-agent measurement with its dose's cross-study context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleAgentRow {
    pub source: String,
    pub sample: String,
    pub drug: String,
    pub dose: Dose,
    /// Growth measured in the target study; this is what scoring uses.
    pub growth: f64,
    pub study: String,
    pub stats: AggregatedDoseStat,
}

/// Single-agent reference rows for one drug, sorted by dose descending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SingleAgentTable {
    pub drug: String,
    pub study: String,
    pub rows: Vec<SingleAgentRow>,
}

impl SingleAgentTable {
    /// Growth of the first row at `dose`, in table order.
    pub fn growth_at(&self, dose: Dose) -> Option<f64> {
        self.rows.iter().find(|row| row.dose == dose).map(|row| row.growth)
    }

    /// Distinct doses in table order (descending).
    pub fn doses(&self) -> Vec<Dose> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.dose)
            .filter(|dose| seen.insert(*dose))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean, sample standard deviation and count of a set of growth values.
pub fn describe(values: &[f64]) -> (f64, Option<f64>, usize) {
    let count = values.len();
    if count == 0 {
        return (f64::NAN, None, 0);
    }
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };
    (mean, std, count)
}

/// Build the single-agent reference table for `drug` against the doses used in combination.
///
/// Only true single-agent records of `sample` at a dose in `partner_doses`
/// are considered. Statistics are computed over all of them; the returned
/// rows are those from `study`, each carrying its dose's statistics.
pub fn align_and_aggregate(
    drug: &str,
    partner_doses: &HashSet<Dose>,
    table: &DoseResponseTable,
    sample: &str,
    study: &str,
) -> SingleAgentTable {
    let aligned: Vec<&DoseResponseRecord> = table
        .iter()
        .filter(|r| r.sample == sample && r.drug1 == drug && r.is_single_agent())
        .filter(|r| partner_doses.contains(&r.dose1))
        .collect();

    let mut by_dose: HashMap<Dose, Vec<f64>> = HashMap::new();
    for record in &aligned {
        by_dose.entry(record.dose1).or_default().push(record.growth);
    }
    let stats: HashMap<Dose, AggregatedDoseStat> = by_dose
        .into_iter()
        .map(|(dose, values)| {
            let (mean, std, count) = describe(&values);
            (dose, AggregatedDoseStat { dose, mean, std, count })
        })
        .collect();

    let mut rows: Vec<SingleAgentRow> = aligned
        .into_iter()
        .filter(|r| r.study == study)
        .filter_map(|r| {
            stats.get(&r.dose1).map(|stat| SingleAgentRow {
                source: r.source.clone(),
                sample: r.sample.clone(),
                drug: r.drug1.clone(),
                dose: r.dose1,
                growth: r.growth,
                study: r.study.clone(),
                stats: stat.clone(),
            })
        })
        .collect();

    // stable: replicates at one dose keep table order, so lookups take the first
    rows.sort_by(|a, b| b.dose.cmp(&a.dose));

    SingleAgentTable {
        drug: drug.to_string(),
        study: study.to_string(),
        rows,
    }
}
