// mod.rs - Core logic module

pub mod aggregate;
pub mod resolver;
pub mod selector;
pub mod synergy;

// Re-export main types for convenience
pub use aggregate::{align_and_aggregate, AggregatedDoseStat, SingleAgentRow, SingleAgentTable};
pub use resolver::{resolve_cell, resolve_drug, DRUG_ID_PREFIX};
pub use selector::{select, Selection};
pub use synergy::{
    combo_score, expected_growth, load_data, ComboRow, LoadedCombination, SynergyMatrices,
};
