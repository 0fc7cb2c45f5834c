// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SelectError};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Input/Output
    pub fasta: Option<String>,
    pub hierarchy: Option<String>,
    pub output: Option<String>,
    pub report: Option<String>,
    pub summary: Option<String>,

    // Selection
    pub classes: Option<Vec<String>>,
    pub max_length: Option<usize>,
    pub count: Option<usize>,
    pub balance_classes: Option<bool>,

    // Scoring
    pub scorer: Option<String>,
    pub alignment_mode: Option<String>,
    pub match_score: Option<i32>,
    pub mismatch_penalty: Option<i32>,
    pub gap_open: Option<i32>,
    pub gap_extend: Option<i32>,
    pub kmer_size: Option<usize>,
    pub strict_alphabet: Option<bool>,

    // Run control
    pub threads: Option<usize>,
    pub resume: Option<bool>,
    pub checkpoint_interval: Option<usize>,
    pub progress: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SelectError::io(path, e))?;
        let config = Self::from_toml(&content, &path.display().to_string())?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SelectError::parse(origin, format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| {
            SelectError::Output(vec![format!("{}: failed to serialize config: {}", path.display(), e)])
        })?;

        fs::write(path, content).map_err(|e| SelectError::io(path, e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# domain-select.toml - Configuration file for domain-select
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Domain sequences (ASTRAL FASTA)
fasta = "/path/to/astral-scopedom-seqres-gd-sel-gs-bib-40-2.08.fa"

# SCOPe classification file (omit to read classes from FASTA headers)
# hierarchy = "/path/to/dir.cla.scope.2.08-stable.txt"

# Selected domains (FASTA)
output = "selected_domains.fa"

# Selection report (TSV)
report = "selection_info.tsv"

# JSON run summary
# summary = "selection_summary.json"

# =============================================================================
# SELECTION
# =============================================================================

# Structural classes: a-l, or A, B, A/B, A+B
classes = ["a", "b", "c", "d"]

# Maximum domain length in residues (inclusive)
max_length = 70

# Number of domains to select
count = 30

# Give each class its proportional share of the selection
balance_classes = false

# =============================================================================
# SCORING
# =============================================================================

# Identity scorer: global, ungapped, kmer
scorer = "global"

# Alignment mode for the global scorer: identity, protein, strict
alignment_mode = "identity"

# Custom alignment scores (overrides preset mode)
# match_score = 1
# mismatch_penalty = 0
# gap_open = 1
# gap_extend = 1

# k-mer length for the kmer scorer
kmer_size = 3

# Reject residues outside the protein alphabet
strict_alphabet = false

# =============================================================================
# RUN CONTROL
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# Continue from the rows already in the report file
resume = false

# Rewrite the report every N selected domains
# checkpoint_interval = 10

# Show a progress bar
progress = false

# Validate inputs without selecting (dry run)
dry_run = false
"#
        .to_string()
    }
}
