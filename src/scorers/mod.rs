// mod.rs - Identity scorers module root

pub mod global;
pub mod kmer;
pub mod registry;
pub mod traits;
pub mod ungapped;

// Re-export main types for convenience
pub use global::GlobalIdentityScorer;
pub use kmer::KmerScorer;
pub use registry::ScorerRegistry;
pub use traits::IdentityScorer;
pub use ungapped::UngappedScorer;
