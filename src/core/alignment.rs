// alignment.rs - Alignment configuration and identity utilities

use serde::{Deserialize, Serialize};

/// Substitution alphabet handed to parasail; residues outside it are aligned as 'X'
pub const ALIGNMENT_ALPHABET: &[u8] = b"ARNDCQEGHILKMFPSTWYVBZXUO";

/// Configuration for pairwise global alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
    pub description: Option<String>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_penalty: 0,
            gap_open: 1,
            gap_extend: 1,
            description: Some("Identity-maximizing protein alignment".to_string()),
        }
    }
}

impl AlignmentConfig {
    /// Create configuration from mode string
    pub fn from_mode(mode: &str) -> Result<Self, String> {
        match mode {
            "identity" => Ok(Self::default()),
            "protein" => Ok(Self {
                match_score: 5,
                mismatch_penalty: -4,
                gap_open: 10,
                gap_extend: 1,
                description: Some("Standard protein alignment".to_string()),
            }),
            "strict" => Ok(Self {
                match_score: 2,
                mismatch_penalty: -3,
                gap_open: 12,
                gap_extend: 2,
                description: Some("Strict protein alignment (higher penalties)".to_string()),
            }),
            _ => Err(format!(
                "Unknown alignment mode: {}. Use: identity, protein, strict",
                mode
            )),
        }
    }

    /// Create custom configuration
    pub fn custom(match_score: i32, mismatch_penalty: i32, gap_open: i32, gap_extend: i32) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_open,
            gap_extend,
            description: Some("Custom alignment parameters".to_string()),
        }
    }

    /// Resolve the alignment for a run: a preset name, or custom values when any
    /// score is given. Unset custom values come from the identity preset.
    pub fn resolve(
        mode: &str,
        match_score: Option<i32>,
        mismatch_penalty: Option<i32>,
        gap_open: Option<i32>,
        gap_extend: Option<i32>,
    ) -> Result<Self, String> {
        let config = if match_score.is_some()
            || mismatch_penalty.is_some()
            || gap_open.is_some()
            || gap_extend.is_some()
        {
            let base = Self::default();
            Self::custom(
                match_score.unwrap_or(base.match_score),
                mismatch_penalty.unwrap_or(base.mismatch_penalty),
                gap_open.unwrap_or(base.gap_open),
                gap_extend.unwrap_or(base.gap_extend),
            )
        } else {
            Self::from_mode(mode)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.match_score <= 0 {
            return Err("Match score must be positive".to_string());
        }
        if self.mismatch_penalty >= self.match_score {
            return Err("Mismatch penalty must be lower than the match score".to_string());
        }
        if self.gap_open < 0 || self.gap_extend < 0 {
            return Err("Gap penalties must not be negative".to_string());
        }
        Ok(())
    }
}

/// Identity of an aligned pair: identical residue columns / alignment columns.
/// Columns where both rows hold a gap are ignored.
pub fn alignment_identity(query: &str, reference: &str) -> f64 {
    let query_bytes = query.as_bytes();
    let ref_bytes = reference.as_bytes();

    let mut matches = 0usize;
    let mut columns = 0usize;

    for (&q, &r) in query_bytes.iter().zip(ref_bytes.iter()) {
        if q == b'-' && r == b'-' {
            continue;
        }
        columns += 1;
        if q == r && q != b'-' {
            matches += 1;
        }
    }

    if columns == 0 {
        0.0
    } else {
        matches as f64 / columns as f64
    }
}
