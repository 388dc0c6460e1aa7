// mod.rs - Data structures module

pub mod loaders;
pub mod records;

// Re-export main types for convenience
pub use records::{
    CellRecord, CellTable, Dose, DoseResponseRecord, DoseResponseTable, DrugRecord, DrugTable,
};
