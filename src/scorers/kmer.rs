// kmer.rs - Alignment-free k-mer overlap identity

use std::collections::HashSet;

use super::traits::{normalize, trivial_identity, IdentityScorer};

pub const DEFAULT_KMER_SIZE: usize = 3;

/// Jaccard index of the two k-mer sets
#[derive(Debug, Clone)]
pub struct KmerScorer {
    k: usize,
}

impl KmerScorer {
    /// `k` of zero is treated as 1
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    fn kmers<'a>(&self, sequence: &'a [u8]) -> HashSet<&'a [u8]> {
        if sequence.len() < self.k {
            return HashSet::new();
        }
        sequence.windows(self.k).collect()
    }
}

impl Default for KmerScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KMER_SIZE)
    }
}

impl IdentityScorer for KmerScorer {
    fn score(&self, a: &[u8], b: &[u8]) -> f64 {
        if let Some(trivial) = trivial_identity(a, b) {
            return trivial;
        }

        let a = normalize(a);
        let b = normalize(b);
        let kmers_a = self.kmers(&a);
        let kmers_b = self.kmers(&b);

        let shared = kmers_a.intersection(&kmers_b).count();
        let union_size = kmers_a.len() + kmers_b.len() - shared;
        if union_size == 0 {
            return 0.0;
        }

        shared as f64 / union_size as f64
    }

    fn name(&self) -> &'static str {
        "kmer"
    }

    fn description(&self) -> &'static str {
        "Jaccard index of shared k-mers (alignment-free, linear time)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmer_identity() {
        let scorer = KmerScorer::new(2);
        // MKVL -> {MK, KV, VL}; MKVA -> {MK, KV, VA}: 2 shared of 4
        assert_eq!(scorer.score(b"MKVL", b"MKVA"), 0.5);
        assert_eq!(scorer.score(b"MKVL", b"mkva"), 0.5);
        assert_eq!(scorer.score(b"MKVL", b"WWWW"), 0.0);
        assert_eq!(scorer.score(b"MKVL", b"MKVL"), 1.0);
    }

    #[test]
    fn test_short_sequences() {
        let scorer = KmerScorer::new(3);
        assert_eq!(scorer.score(b"MK", b"MV"), 0.0);
        assert_eq!(scorer.score(b"MK", b"mk"), 1.0);
        assert_eq!(scorer.score(b"MK", b"MKVL"), 0.0);
    }

    #[test]
    fn test_zero_k_is_clamped() {
        assert_eq!(KmerScorer::new(0).k(), 1);
        assert_eq!(KmerScorer::default().k(), DEFAULT_KMER_SIZE);
    }
}
