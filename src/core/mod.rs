// mod.rs - Core logic module

pub mod alignment;
pub mod filter;
pub mod pipeline;
pub mod selection;

// Re-export main types for convenience
pub use alignment::{alignment_identity, AlignmentConfig};
pub use filter::{filter, Candidate, CandidatePool, FilterOutcome, FilterStats};
pub use pipeline::{prepare_pool, run_selection, PreparedPool, RunConfig, RunOutcome};
pub use selection::{
    class_quotas, GreedySelector, ReportEntry, SelectionOptions, SelectionReport, SelectionState,
    Shortfall,
};
