// validation.rs - Input validation utilities

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::cli::args::Args;
use crate::core::pipeline::{DEFAULT_OUTPUT, DEFAULT_REPORT};
use crate::core::{AlignmentConfig, RunConfig};
use crate::data::StructuralClass;
use crate::error::{Result, SelectError};
use crate::scorers::ScorerRegistry;

pub struct ValidationResult {
    pub run_config: RunConfig,
    pub threads: Option<usize>,
    pub dry_run: bool,
}

/// Parse a comma separated class list such as `a,b,A/B`
pub fn parse_classes(list: &str) -> Result<BTreeSet<StructuralClass>> {
    let mut classes = BTreeSet::new();
    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let class = token.parse::<StructuralClass>().map_err(SelectError::InvalidParameter)?;
        classes.insert(class);
    }
    if classes.is_empty() {
        return Err(SelectError::invalid(format!(
            "no structural classes in '{}'",
            list
        )));
    }
    Ok(classes)
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    let fasta = args
        .fasta
        .as_ref()
        .ok_or_else(|| SelectError::invalid("--fasta is required (or set 'fasta' in the config file)"))?;

    // Validate scorer
    let registry = ScorerRegistry::new();
    if !registry.has_scorer(&args.scorer) {
        return Err(SelectError::invalid(format!(
            "Invalid scorer '{}'. Available: {}",
            args.scorer,
            registry.get_scorer_names().join(", ")
        )));
    }

    let classes = parse_classes(&args.classes)?;

    if args.max_length == 0 {
        return Err(SelectError::invalid("--max-length must be positive"));
    }
    if args.count == 0 {
        return Err(SelectError::invalid("--count must be positive"));
    }
    if args.kmer_size == 0 {
        return Err(SelectError::invalid("--kmer-size must be positive"));
    }
    if args.threads == Some(0) {
        return Err(SelectError::invalid("--threads must be positive"));
    }
    if args.checkpoint_interval == Some(0) {
        return Err(SelectError::invalid("--checkpoint-interval must be positive"));
    }

    // Validate and create alignment config
    let alignment = AlignmentConfig::resolve(
        &args.alignment_mode,
        args.match_score,
        args.mismatch_penalty,
        args.gap_open,
        args.gap_extend,
    )
    .map_err(SelectError::InvalidParameter)?;

    let run_config = RunConfig {
        fasta: PathBuf::from(fasta),
        hierarchy: args.hierarchy.as_ref().map(PathBuf::from),
        classes,
        max_length: args.max_length,
        target_count: args.count,
        output: PathBuf::from(args.output.as_deref().unwrap_or(DEFAULT_OUTPUT)),
        report: PathBuf::from(args.report.as_deref().unwrap_or(DEFAULT_REPORT)),
        summary: args.summary.as_ref().map(PathBuf::from),
        scorer: args.scorer.clone(),
        alignment,
        kmer_size: args.kmer_size,
        strict_alphabet: args.strict_alphabet,
        balance_classes: args.balance_classes,
        resume: args.resume,
        checkpoint_interval: args.checkpoint_interval,
        show_progress: args.progress,
    };
    run_config.validate()?;

    Ok(ValidationResult {
        run_config,
        threads: args.threads,
        dry_run: args.dry_run,
    })
}
