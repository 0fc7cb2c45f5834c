// traits.rs - Core trait for pairwise identity scoring

use std::fmt::Debug;

use crate::data::SequenceRecord;

/// Pairwise sequence identity in [0, 1].
///
/// Implementations must be symmetric (`score(a, b) == score(b, a)`), return
/// exactly 1.0 for identical sequences and be deterministic. Comparison is
/// case-insensitive.
pub trait IdentityScorer: Send + Sync + Debug {
    /// Identity between two residue sequences
    fn score(&self, a: &[u8], b: &[u8]) -> f64;

    /// Get a human-readable name for this scorer
    fn name(&self) -> &'static str;

    /// Get a description of this scorer
    fn description(&self) -> &'static str;

    fn score_records(&self, a: &SequenceRecord, b: &SequenceRecord) -> f64 {
        self.score(a.residues(), b.residues())
    }
}

/// Shared fast paths: identical sequences score 1.0, an empty side scores 0.0
pub fn trivial_identity(a: &[u8], b: &[u8]) -> Option<f64> {
    if a.eq_ignore_ascii_case(b) {
        Some(1.0)
    } else if a.is_empty() || b.is_empty() {
        Some(0.0)
    } else {
        None
    }
}

/// Uppercase copy of a residue sequence
pub fn normalize(seq: &[u8]) -> Vec<u8> {
    seq.to_ascii_uppercase()
}

/// Order a pair so the lesser sequence comes first
pub fn canonical_pair<'a>(a: &'a [u8], b: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_identity() {
        assert_eq!(trivial_identity(b"mkvl", b"MKVL"), Some(1.0));
        assert_eq!(trivial_identity(b"", b""), Some(1.0));
        assert_eq!(trivial_identity(b"", b"MK"), Some(0.0));
        assert_eq!(trivial_identity(b"MK", b"MV"), None);
    }

    #[test]
    fn test_canonical_pair() {
        let (a, b) = canonical_pair(b"WK", b"AK");
        assert_eq!(a, b"AK");
        assert_eq!(b, b"WK");
        assert_eq!(canonical_pair(b"AK", b"WK"), (a, b));
    }
}
