// lib.rs - domain-select library root

//! # domain-select - Diverse, low-redundancy subsets of protein domain sequences
//!
//! Filters a SCOP/ASTRAL domain collection by structural class and length,
//! then grows a subset greedily: each step adds the candidate whose highest
//! sequence identity to the members chosen so far is lowest.
//!
//! ## Features
//!
//! - **Pluggable scorers**: global alignment (parasail), ungapped and k-mer identity
//! - **Incremental**: one scorer call per remaining candidate per step
//! - **Deterministic**: ties broken by input order, identical output across thread counts
//! - **Resumable**: continue a run from an existing report
//! - **All-or-nothing output**: FASTA and report are committed together
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use domain_select::prelude::*;
//!
//! let mut config = RunConfig::new("astral-40.fa");
//! config.target_count = 30;
//! config.scorer = "ungapped".to_string();
//!
//! let outcome = run_selection(&config)?;
//! for entry in &outcome.report.entries {
//!     println!("{}\t{}\t{:.4}", entry.order, entry.id, entry.identity);
//! }
//! # Ok::<(), domain_select::SelectError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;
pub mod scorers;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{filter, run_selection, AlignmentConfig, RunConfig};
    pub use crate::core::{GreedySelector, SelectionOptions, SelectionReport};
    pub use crate::data::{ClassMap, ClassMapStats, SequenceStore, StructuralClass};
    pub use crate::error::{Result, SelectError};
    pub use crate::output::{read_report, write_outputs};
    pub use crate::scorers::{IdentityScorer, ScorerRegistry};
    pub use crate::VERSION;
}

// Re-export main types at the root level for convenience
pub use crate::core::{AlignmentConfig, RunConfig, SelectionReport};
pub use crate::error::{Result, SelectError};
pub use crate::scorers::{IdentityScorer, ScorerRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
