// ungapped.rs - Position-wise identity without alignment

use super::traits::{trivial_identity, IdentityScorer};

/// Matches over the overlapping prefix divided by the longer length.
/// Length differences therefore count as mismatches.
#[derive(Debug, Clone, Default)]
pub struct UngappedScorer;

impl IdentityScorer for UngappedScorer {
    fn score(&self, a: &[u8], b: &[u8]) -> f64 {
        if let Some(trivial) = trivial_identity(a, b) {
            return trivial;
        }

        let max_len = a.len().max(b.len());
        let matches = a
            .iter()
            .zip(b.iter())
            .filter(|(x, y)| x.eq_ignore_ascii_case(y))
            .count();

        matches as f64 / max_len as f64
    }

    fn name(&self) -> &'static str {
        "ungapped"
    }

    fn description(&self) -> &'static str {
        "Position-wise identity over the longer length (no gaps, linear time)"
    }
}
