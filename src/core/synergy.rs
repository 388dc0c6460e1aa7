// synergy.rs - Expected growth, combination scores and the load_data pipeline

use crate::core::aggregate::{align_and_aggregate, SingleAgentTable};
use crate::core::resolver::{resolve_cell, resolve_drug};
use crate::core::selector::select;
use crate::data::{CellTable, Dose, DoseResponseRecord, DoseResponseTable, DrugTable};
use crate::error::{Result, SynergyError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Growth percentages are capped here before entering the additive model.
pub const GROWTH_CAP: f64 = 100.0;

/// Expected combined growth of two single agents (Bliss-style independence).
///
/// When either agent alone suppresses growth (≤ 0) the more toxic one
/// dominates and the expectation is the minimum of the two. Otherwise both
/// growths are capped at [`GROWTH_CAP`] and multiplied as fractions.
pub fn expected_growth(growth1: f64, growth2: f64) -> f64 {
    if growth1 <= 0.0 || growth2 <= 0.0 {
        growth1.min(growth2)
    } else {
        growth1.min(GROWTH_CAP) * growth2.min(GROWTH_CAP) / GROWTH_CAP
    }
}

/// Expected minus observed growth: positive is synergy, negative antagonism.
pub fn combo_score(observed: f64, growth1: f64, growth2: f64) -> f64 {
    expected_growth(growth1, growth2) - observed
}

/// One paired-dose measurement annotated with its expected growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboRow {
    pub source: String,
    pub sample: String,
    pub drug1: String,
    pub drug2: String,
    pub dose1: Dose,
    pub dose2: Dose,
    pub growth: f64,
    pub expected_growth: f64,
    pub score: f64,
    pub study: String,
}

/// Everything computed for one (cell, drug1, drug2) query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedCombination {
    pub sample: String,
    /// Final drug orientation, after any swap.
    pub drug1: String,
    pub drug2: String,
    pub swapped: bool,
    pub study: String,
    /// Sorted by (dose1, dose2) descending.
    pub combo: Vec<ComboRow>,
    pub drug1_agent: SingleAgentTable,
    pub drug2_agent: SingleAgentTable,
}

fn reference_growth(agent: &SingleAgentTable, dose: Dose) -> Result<f64> {
    agent
        .growth_at(dose)
        .ok_or_else(|| SynergyError::MissingDoseReference {
            drug: agent.drug.clone(),
            dose: dose.value(),
            study: agent.study.clone(),
        })
}

fn score_record(
    record: &DoseResponseRecord,
    dose2: Dose,
    drug1_agent: &SingleAgentTable,
    drug2_agent: &SingleAgentTable,
) -> Result<ComboRow> {
    let growth1 = reference_growth(drug1_agent, record.dose1)?;
    let growth2 = reference_growth(drug2_agent, dose2)?;
    let expected = expected_growth(growth1, growth2);

    Ok(ComboRow {
        source: record.source.clone(),
        sample: record.sample.clone(),
        drug1: record.drug1.clone(),
        drug2: drug2_agent.drug.clone(),
        dose1: record.dose1,
        dose2,
        growth: record.growth,
        expected_growth: expected,
        score: expected - record.growth,
        study: record.study.clone(),
    })
}

/// Resolve names, select combination records, align single agents and score every dose pair.
///
/// A pure function of its inputs. Any combination dose without a
/// single-agent reference in the matched study fails the whole call.
pub fn load_data(
    cell: &str,
    drug1: &str,
    drug2: &str,
    response: &DoseResponseTable,
    cells: &CellTable,
    drugs: &DrugTable,
) -> Result<LoadedCombination> {
    let sample = resolve_cell(cell, cells)?;
    let drug1 = resolve_drug(drug1, drugs)?;
    let drug2 = resolve_drug(drug2, drugs)?;

    let selection = select(&sample, &drug1, &drug2, response)?;

    let pairs: Vec<(&DoseResponseRecord, Dose)> = selection
        .combo
        .iter()
        .map(|r| match r.dose2 {
            Some(dose2) => Ok((*r, dose2)),
            None => Err(SynergyError::IncompleteCombination {
                sample: r.sample.clone(),
                drug1: r.drug1.clone(),
                drug2: r.drug2.clone().unwrap_or_default(),
                dose1: r.dose1.value(),
                study: r.study.clone(),
            }),
        })
        .collect::<Result<_>>()?;

    let doses1: HashSet<Dose> = pairs.iter().map(|(r, _)| r.dose1).collect();
    let doses2: HashSet<Dose> = pairs.iter().map(|(_, dose2)| *dose2).collect();

    let drug1_agent =
        align_and_aggregate(&selection.drug1, &doses1, response, &sample, &selection.study);
    let drug2_agent =
        align_and_aggregate(&selection.drug2, &doses2, response, &sample, &selection.study);

    let mut combo = pairs
        .iter()
        .map(|(record, dose2)| score_record(record, *dose2, &drug1_agent, &drug2_agent))
        .collect::<Result<Vec<_>>>()?;
    combo.sort_by(|a, b| (b.dose1, b.dose2).cmp(&(a.dose1, a.dose2)));

    Ok(LoadedCombination {
        sample,
        drug1: selection.drug1,
        drug2: selection.drug2,
        swapped: selection.swapped,
        study: selection.study,
        combo,
        drug1_agent,
        drug2_agent,
    })
}

/// Dose-by-dose matrices: rows follow drug1 doses, columns drug2 doses, both descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyMatrices {
    pub drug1_doses: Vec<Dose>,
    pub drug2_doses: Vec<Dose>,
    pub growth: Vec<Vec<f64>>,
    pub expected: Vec<Vec<f64>>,
    /// expected - growth, elementwise
    pub score: Vec<Vec<f64>>,
}

impl SynergyMatrices {
    /// Arrange combination rows on the single-agent dose grid.
    ///
    /// Every grid cell must be filled exactly once.
    pub fn from_combination(data: &LoadedCombination) -> Result<Self> {
        let drug1_doses = data.drug1_agent.doses();
        let drug2_doses = data.drug2_agent.doses();
        let (rows, cols) = (drug1_doses.len(), drug2_doses.len());
        let shape_error = |reason: String| SynergyError::MatrixShape {
            rows,
            cols,
            records: data.combo.len(),
            reason,
        };

        let mut cells: Vec<Vec<Option<(f64, f64)>>> = vec![vec![None; cols]; rows];
        for row in &data.combo {
            let i = drug1_doses
                .iter()
                .position(|d| *d == row.dose1)
                .ok_or_else(|| shape_error(format!("drug1 dose {} off grid", row.dose1)))?;
            let j = drug2_doses
                .iter()
                .position(|d| *d == row.dose2)
                .ok_or_else(|| shape_error(format!("drug2 dose {} off grid", row.dose2)))?;
            if cells[i][j].is_some() {
                return Err(shape_error(format!(
                    "dose pair ({}, {}) measured more than once",
                    row.dose1, row.dose2
                )));
            }
            cells[i][j] = Some((row.growth, row.expected_growth));
        }

        let mut growth = vec![vec![0.0; cols]; rows];
        let mut expected = vec![vec![0.0; cols]; rows];
        for (i, line) in cells.iter().enumerate() {
            for (j, cell) in line.iter().enumerate() {
                let (g, e) = (*cell).ok_or_else(|| {
                    shape_error(format!(
                        "dose pair ({}, {}) not measured",
                        drug1_doses[i], drug2_doses[j]
                    ))
                })?;
                growth[i][j] = g;
                expected[i][j] = e;
            }
        }

        let score = expected
            .iter()
            .zip(&growth)
            .map(|(e_row, g_row)| e_row.iter().zip(g_row).map(|(e, g)| e - g).collect())
            .collect();

        Ok(Self {
            drug1_doses,
            drug2_doses,
            growth,
            expected,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CellRecord, DrugRecord};
    use proptest::prelude::*;

    fn single(drug: &str, dose: f64, growth: f64, study: &str) -> DoseResponseRecord {
        DoseResponseRecord {
            source: "NCI".to_string(),
            sample: "X".to_string(),
            drug1: drug.to_string(),
            drug2: None,
            dose1: Dose(dose),
            dose2: None,
            growth,
            study: study.to_string(),
        }
    }

    fn pair(d1: &str, d2: &str, dose1: f64, dose2: f64, growth: f64, study: &str) -> DoseResponseRecord {
        DoseResponseRecord {
            drug2: Some(d2.to_string()),
            dose2: Some(Dose(dose2)),
            ..single(d1, dose1, growth, study)
        }
    }

    fn cells() -> CellTable {
        CellTable::new(vec![CellRecord {
            id: "X".to_string(),
            short_name: "CELL-X".to_string(),
            display_name: "Cell X".to_string(),
        }])
    }

    fn drugs() -> DrugTable {
        DrugTable::new(vec![
            DrugRecord {
                id: "NSC.1".to_string(),
                name: "Alpha".to_string(),
            },
            DrugRecord {
                id: "NSC.2".to_string(),
                name: "Beta".to_string(),
            },
        ])
    }

    /// 2x2 grid: NSC.1 at {10, 1}, NSC.2 at {5, 0.5}.
    fn grid_table() -> DoseResponseTable {
        DoseResponseTable::new(vec![
            single("NSC.1", 1.0, 95.0, "S"),
            single("NSC.1", 10.0, 60.0, "S"),
            single("NSC.1", 10.0, 20.0, "OTHER"),
            single("NSC.1", 100.0, 5.0, "S"),
            single("NSC.2", 0.5, 120.0, "S"),
            single("NSC.2", 5.0, -10.0, "S"),
            pair("NSC.1", "NSC.2", 1.0, 0.5, 90.0, "S"),
            pair("NSC.1", "NSC.2", 10.0, 5.0, -30.0, "S"),
            pair("NSC.1", "NSC.2", 1.0, 5.0, -15.0, "S"),
            pair("NSC.1", "NSC.2", 10.0, 0.5, 50.0, "S"),
        ])
    }

    #[test]
    fn test_expected_growth_examples() {
        assert_eq!(expected_growth(80.0, 60.0), 48.0);
        assert_eq!(expected_growth(150.0, 50.0), 50.0);
        assert_eq!(expected_growth(-20.0, 40.0), -20.0);
        assert_eq!(expected_growth(0.0, 40.0), 0.0);
        assert_eq!(expected_growth(-5.0, -50.0), -50.0);
        assert_eq!(combo_score(30.0, 80.0, 60.0), 18.0);
    }

    proptest! {
        #[test]
        fn prop_expected_growth_is_symmetric(g1 in -150.0f64..250.0, g2 in -150.0f64..250.0) {
            prop_assert_eq!(expected_growth(g1, g2), expected_growth(g2, g1));
        }

        #[test]
        fn prop_positive_growth_uses_capped_product(g1 in 0.001f64..300.0, g2 in 0.001f64..300.0) {
            prop_assert_eq!(expected_growth(g1, g2), g1.min(100.0) * g2.min(100.0) / 100.0);
        }

        #[test]
        fn prop_suppressed_growth_takes_minimum(g1 in -200.0f64..=0.0, g2 in -200.0f64..200.0) {
            prop_assert_eq!(expected_growth(g1, g2), g1.min(g2));
        }

        #[test]
        fn prop_score_is_expected_minus_observed(obs in -100.0f64..150.0, g1 in -100.0f64..150.0, g2 in -100.0f64..150.0) {
            prop_assert_eq!(combo_score(obs, g1, g2), expected_growth(g1, g2) - obs);
        }
    }

    #[test]
    fn test_end_to_end_single_pair() {
        let table = DoseResponseTable::new(vec![
            single("NSC.1", 10.0, 90.0, "S"),
            single("NSC.2", 5.0, 70.0, "S"),
            pair("NSC.1", "NSC.2", 10.0, 5.0, 40.0, "S"),
        ]);

        let data = load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()).unwrap();
        assert_eq!(data.combo.len(), 1);
        assert_eq!(data.combo[0].expected_growth, 63.0);
        assert_eq!(data.combo[0].score, 23.0);
        assert_eq!(data.study, "S");
        assert!(!data.swapped);
    }

    #[test]
    fn test_names_resolve_through_reference_tables() {
        let data = load_data("cell-x", "alpha", "BETA", &grid_table(), &cells(), &drugs()).unwrap();
        assert_eq!(data.sample, "X");
        assert_eq!(data.drug1, "NSC.1");
        assert_eq!(data.drug2, "NSC.2");
    }

    #[test]
    fn test_missing_reference_dose_fails_without_partial_result() {
        let table = DoseResponseTable::new(vec![
            single("NSC.1", 10.0, 90.0, "S"),
            single("NSC.2", 5.0, 70.0, "S"),
            pair("NSC.1", "NSC.2", 10.0, 5.0, 40.0, "S"),
            pair("NSC.1", "NSC.2", 20.0, 5.0, 30.0, "S"),
        ]);

        match load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()) {
            Err(SynergyError::MissingDoseReference { drug, dose, study }) => {
                assert_eq!(drug, "NSC.1");
                assert_eq!(dose, 20.0);
                assert_eq!(study, "S");
            }
            other => panic!("expected missing dose reference, got {:?}", other),
        }
    }

    #[test]
    fn test_combination_without_second_dose_fails() {
        let table = DoseResponseTable::new(vec![
            single("NSC.1", 10.0, 90.0, "S"),
            single("NSC.2", 5.0, 70.0, "S"),
            pair("NSC.1", "NSC.2", 10.0, 5.0, 40.0, "S"),
            DoseResponseRecord {
                dose2: None,
                ..pair("NSC.1", "NSC.2", 20.0, 5.0, 30.0, "S")
            },
        ]);

        match load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()) {
            Err(SynergyError::IncompleteCombination { drug2, dose1, .. }) => {
                assert_eq!(drug2, "NSC.2");
                assert_eq!(dose1, 20.0);
            }
            other => panic!("expected incomplete combination, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_from_another_study_does_not_count() {
        let table = DoseResponseTable::new(vec![
            single("NSC.1", 10.0, 90.0, "OTHER"),
            single("NSC.2", 5.0, 70.0, "S"),
            pair("NSC.1", "NSC.2", 10.0, 5.0, 40.0, "S"),
        ]);
        assert!(matches!(
            load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()),
            Err(SynergyError::MissingDoseReference { .. })
        ));
    }

    #[test]
    fn test_combo_rows_sorted_descending_and_use_study_growth() {
        let data = load_data("X", "NSC.1", "NSC.2", &grid_table(), &cells(), &drugs()).unwrap();
        let order: Vec<(f64, f64)> = data
            .combo
            .iter()
            .map(|r| (r.dose1.value(), r.dose2.value()))
            .collect();
        assert_eq!(order, vec![(10.0, 5.0), (10.0, 0.5), (1.0, 5.0), (1.0, 0.5)]);

        // dose 100 never used in combination
        assert_eq!(data.drug1_agent.doses(), vec![Dose(10.0), Dose(1.0)]);

        // 60 (study S, not the 20 from OTHER) with 120 capped to 100
        assert_eq!(data.combo[1].expected_growth, 60.0);
        // -10 suppresses: min(60, -10)
        assert_eq!(data.combo[0].expected_growth, -10.0);
        assert_eq!(data.combo[0].score, 20.0);
        // 95 * 100 / 100
        assert_eq!(data.combo[3].expected_growth, 95.0);
    }

    #[test]
    fn test_swapped_query_reconciles_with_direct_query() {
        let table = grid_table();
        let direct = load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()).unwrap();
        let swapped = load_data("X", "NSC.2", "NSC.1", &table, &cells(), &drugs()).unwrap();

        assert!(swapped.swapped);
        assert_eq!(swapped.drug1, "NSC.1");
        assert_eq!(swapped.drug2, "NSC.2");

        let key = |r: &ComboRow| (r.dose1, r.dose2, r.growth.to_bits(), r.expected_growth.to_bits());
        let a: HashSet<_> = direct.combo.iter().map(key).collect();
        let b: HashSet<_> = swapped.combo.iter().map(key).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_combination_data() {
        let table = DoseResponseTable::new(vec![single("NSC.1", 10.0, 90.0, "S")]);
        assert!(matches!(
            load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()),
            Err(SynergyError::NoCombinationData { .. })
        ));
    }

    #[test]
    fn test_matrices_follow_descending_dose_order() {
        let data = load_data("X", "NSC.1", "NSC.2", &grid_table(), &cells(), &drugs()).unwrap();
        let m = SynergyMatrices::from_combination(&data).unwrap();

        assert_eq!(m.drug1_doses, vec![Dose(10.0), Dose(1.0)]);
        assert_eq!(m.drug2_doses, vec![Dose(5.0), Dose(0.5)]);
        assert_eq!(m.growth, vec![vec![-30.0, 50.0], vec![-15.0, 90.0]]);
        assert_eq!(m.expected, vec![vec![-10.0, 60.0], vec![-10.0, 95.0]]);
        assert_eq!(m.score, vec![vec![20.0, 10.0], vec![5.0, 5.0]]);
    }

    #[test]
    fn test_matrix_rejects_incomplete_grid() {
        let mut table = grid_table();
        // drop the (1.0, 0.5) combination
        table.records.remove(6);
        let data = load_data("X", "NSC.1", "NSC.2", &table, &cells(), &drugs()).unwrap();
        assert!(matches!(
            SynergyMatrices::from_combination(&data),
            Err(SynergyError::MatrixShape { rows: 2, cols: 2, records: 3, .. })
        ));
    }
}
