// registry.rs - Scorer registry for managing available identity scorers

use std::collections::BTreeMap;

use super::traits::IdentityScorer;
use super::{GlobalIdentityScorer, KmerScorer, UngappedScorer};
use crate::core::AlignmentConfig;

/// Registry of named scorers. Ordered so listings are stable.
pub struct ScorerRegistry {
    scorers: BTreeMap<String, Box<dyn IdentityScorer>>,
}

impl ScorerRegistry {
    /// Built-in scorers with default settings
    pub fn new() -> Self {
        Self::with_settings(AlignmentConfig::default(), super::kmer::DEFAULT_KMER_SIZE)
    }

    /// Built-in scorers configured for a run
    pub fn with_settings(alignment: AlignmentConfig, kmer_size: usize) -> Self {
        let mut registry = Self {
            scorers: BTreeMap::new(),
        };

        registry.register_scorer("global", Box::new(GlobalIdentityScorer::new(alignment)));
        registry.register_scorer("ungapped", Box::new(UngappedScorer));
        registry.register_scorer("kmer", Box::new(KmerScorer::new(kmer_size)));

        registry
    }

    /// Register a new scorer
    pub fn register_scorer(&mut self, name: &str, scorer: Box<dyn IdentityScorer>) {
        self.scorers.insert(name.to_string(), scorer);
    }

    /// Get a scorer by name
    pub fn get_scorer(&self, name: &str) -> Option<&dyn IdentityScorer> {
        self.scorers.get(name).map(|s| s.as_ref())
    }

    /// Check if a scorer exists
    pub fn has_scorer(&self, name: &str) -> bool {
        self.scorers.contains_key(name)
    }

    /// List all available scorers
    pub fn list_scorers(&self) -> Vec<(&str, &str)> {
        self.scorers
            .iter()
            .map(|(name, s)| (name.as_str(), s.description()))
            .collect()
    }

    /// Get all scorer names
    pub fn get_scorer_names(&self) -> Vec<&str> {
        self.scorers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
