// global.rs - Global alignment identity via parasail

use parasail_rs::{Aligner, Matrix};
use tracing::debug;

use super::traits::{canonical_pair, trivial_identity, IdentityScorer};
use super::ungapped::UngappedScorer;
use crate::core::alignment::{alignment_identity, AlignmentConfig, ALIGNMENT_ALPHABET};

/// Identity over a full Needleman-Wunsch alignment with traceback.
/// Quadratic in sequence length, which is acceptable for domain-sized inputs.
#[derive(Debug, Clone, Default)]
pub struct GlobalIdentityScorer {
    config: AlignmentConfig,
}

impl GlobalIdentityScorer {
    pub fn new(config: AlignmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Uppercase and map residues outside the substitution alphabet to 'X'
    fn prepare(sequence: &[u8]) -> Vec<u8> {
        sequence
            .iter()
            .map(|r| {
                let upper = r.to_ascii_uppercase();
                if ALIGNMENT_ALPHABET.contains(&upper) {
                    upper
                } else {
                    b'X'
                }
            })
            .collect()
    }

    fn align_identity(&self, query: &[u8], reference: &[u8]) -> Option<f64> {
        let matrix = match Matrix::create(
            ALIGNMENT_ALPHABET,
            self.config.match_score,
            self.config.mismatch_penalty,
        ) {
            Ok(m) => m,
            Err(_) => return None,
        };

        let trace_aligner = Aligner::new()
            .matrix(matrix)
            .gap_open(self.config.gap_open)
            .gap_extend(self.config.gap_extend)
            .global()
            .use_trace()
            .build();

        let result = trace_aligner.align(Some(query), reference).ok()?;
        let traceback = result.get_traceback_strings(query, reference).ok()?;
        Some(alignment_identity(&traceback.query, &traceback.reference))
    }
}

impl IdentityScorer for GlobalIdentityScorer {
    fn score(&self, a: &[u8], b: &[u8]) -> f64 {
        if let Some(trivial) = trivial_identity(a, b) {
            return trivial;
        }

        let a = Self::prepare(a);
        let b = Self::prepare(b);
        // Fixed argument order keeps traceback tie-breaking symmetric
        let (query, reference) = canonical_pair(&a, &b);

        match self.align_identity(query, reference) {
            Some(identity) => identity.clamp(0.0, 1.0),
            None => {
                debug!("Alignment failed, falling back to ungapped identity");
                UngappedScorer.score(query, reference)
            }
        }
    }

    fn name(&self) -> &'static str {
        "global"
    }

    fn description(&self) -> &'static str {
        "Global alignment identity (identical columns / alignment length)"
    }
}
