// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.fasta.is_none() {
            self.fasta = config.fasta;
        }
        if self.hierarchy.is_none() {
            self.hierarchy = config.hierarchy;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.report.is_none() {
            self.report = config.report;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }

        // Selection (only override defaults, not explicit CLI values)
        if self.classes == "a,b,c,d" {
            if let Some(classes) = config.classes {
                self.classes = classes.join(",");
            }
        }
        if self.max_length == 70 {
            if let Some(max_length) = config.max_length {
                self.max_length = max_length;
            }
        }
        if self.count == 30 {
            if let Some(count) = config.count {
                self.count = count;
            }
        }

        // Scoring
        if self.scorer == "global" {
            if let Some(scorer) = config.scorer {
                self.scorer = scorer;
            }
        }
        if self.alignment_mode == "identity" {
            if let Some(mode) = config.alignment_mode {
                self.alignment_mode = mode;
            }
        }
        if self.match_score.is_none() {
            self.match_score = config.match_score;
        }
        if self.mismatch_penalty.is_none() {
            self.mismatch_penalty = config.mismatch_penalty;
        }
        if self.gap_open.is_none() {
            self.gap_open = config.gap_open;
        }
        if self.gap_extend.is_none() {
            self.gap_extend = config.gap_extend;
        }
        if self.kmer_size == 3 {
            if let Some(k) = config.kmer_size {
                self.kmer_size = k;
            }
        }

        // Run control
        if self.threads.is_none() {
            self.threads = config.threads;
        }
        if self.checkpoint_interval.is_none() {
            self.checkpoint_interval = config.checkpoint_interval;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.strict_alphabet && config.strict_alphabet.unwrap_or(false) {
            self.strict_alphabet = true;
        }
        if !self.balance_classes && config.balance_classes.unwrap_or(false) {
            self.balance_classes = true;
        }
        if !self.resume && config.resume.unwrap_or(false) {
            self.resume = true;
        }
        if !self.progress && config.progress.unwrap_or(false) {
            self.progress = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
