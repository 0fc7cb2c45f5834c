// mod.rs - Data structures module

pub mod classification;
pub mod loaders;
pub mod sequence;

// Re-export main types for convenience
pub use classification::{ClassMap, ClassMapStats, StructuralClass};
pub use sequence::{SequenceRecord, SequenceStore, PROTEIN_ALPHABET};
