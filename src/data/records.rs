// records.rs - Dose-response, cell and drug record structures

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A drug concentration.
///
/// Ordered with `f64::total_cmp` so doses can key groupings and be sorted;
/// two doses are equal exactly when their numeric values are equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dose(pub f64);

impl Dose {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Dose {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Dose {}

impl PartialOrd for Dose {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dose {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Dose {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Dose {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(Dose)
    }
}

impl From<f64> for Dose {
    fn from(value: f64) -> Self {
        Dose(value)
    }
}

/// One measured growth percentage for a sample under one or two drugs.
///
/// `drug2`/`dose2` are both `None` for single-agent records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseResponseRecord {
    pub source: String,
    pub sample: String,
    pub drug1: String,
    pub drug2: Option<String>,
    pub dose1: Dose,
    pub dose2: Option<Dose>,
    pub growth: f64,
    pub study: String,
}

impl DoseResponseRecord {
    /// True for records measured with a single drug.
    pub fn is_single_agent(&self) -> bool {
        self.drug2.is_none()
    }
}

/// Cell line reference row used for name resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Canonical sample identifier (e.g. `BREAST:MDA_MB_468`).
    pub id: String,
    pub short_name: String,
    pub display_name: String,
}

/// Drug reference row used for name resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    /// Canonical prefixed identifier (e.g. `NSC.747599`).
    pub id: String,
    pub name: String,
}

/// The full dose-response table, in file order.
#[derive(Debug, Clone, Default)]
pub struct DoseResponseTable {
    pub records: Vec<DoseResponseRecord>,
}

impl DoseResponseTable {
    pub fn new(records: Vec<DoseResponseRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DoseResponseRecord> {
        self.records.iter()
    }
}

/// Cell line reference table, in file order.
#[derive(Debug, Clone, Default)]
pub struct CellTable {
    pub records: Vec<CellRecord>,
}

impl CellTable {
    pub fn new(records: Vec<CellRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drug reference table, in file order.
#[derive(Debug, Clone, Default)]
pub struct DrugTable {
    pub records: Vec<DrugRecord>,
}

impl DrugTable {
    pub fn new(records: Vec<DrugRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
