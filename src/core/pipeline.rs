// pipeline.rs - End-to-end selection run: load, filter, select, write

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::alignment::AlignmentConfig;
use crate::core::filter::{filter, FilterOutcome};
use crate::core::selection::{GreedySelector, SelectionOptions, SelectionReport};
use crate::data::{ClassMap, SequenceStore, StructuralClass};
use crate::error::{Result, SelectError};
use crate::output::summary::pool_fingerprint;
use crate::output::{read_report, write_outputs, write_report_checkpoint, write_summary, RunSummary};
use crate::scorers::{kmer::DEFAULT_KMER_SIZE, ScorerRegistry};

/// Classes selected when none are given (all-alpha, all-beta, a/b, a+b)
pub const DEFAULT_CLASSES: [StructuralClass; 4] = [
    StructuralClass::AllAlpha,
    StructuralClass::AllBeta,
    StructuralClass::AlphaSlashBeta,
    StructuralClass::AlphaPlusBeta,
];
pub const DEFAULT_MAX_LENGTH: usize = 70;
pub const DEFAULT_TARGET_COUNT: usize = 30;
pub const DEFAULT_OUTPUT: &str = "selected_domains.fa";
pub const DEFAULT_REPORT: &str = "selection_info.tsv";
pub const DEFAULT_SCORER: &str = "global";

/// Fully validated parameters of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub fasta: PathBuf,
    /// Classes come from FASTA headers when absent
    pub hierarchy: Option<PathBuf>,
    pub classes: BTreeSet<StructuralClass>,
    pub max_length: usize,
    pub target_count: usize,
    pub output: PathBuf,
    pub report: PathBuf,
    pub summary: Option<PathBuf>,
    pub scorer: String,
    pub alignment: AlignmentConfig,
    pub kmer_size: usize,
    pub strict_alphabet: bool,
    pub balance_classes: bool,
    pub resume: bool,
    /// Rewrite the report every N selected rows
    pub checkpoint_interval: Option<usize>,
    pub show_progress: bool,
}

impl RunConfig {
    pub fn new(fasta: impl Into<PathBuf>) -> Self {
        Self {
            fasta: fasta.into(),
            hierarchy: None,
            classes: DEFAULT_CLASSES.into_iter().collect(),
            max_length: DEFAULT_MAX_LENGTH,
            target_count: DEFAULT_TARGET_COUNT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            report: PathBuf::from(DEFAULT_REPORT),
            summary: None,
            scorer: DEFAULT_SCORER.to_string(),
            alignment: AlignmentConfig::default(),
            kmer_size: DEFAULT_KMER_SIZE,
            strict_alphabet: false,
            balance_classes: false,
            resume: false,
            checkpoint_interval: None,
            show_progress: false,
        }
    }

    /// Reject parameter combinations before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(SelectError::invalid("class set must not be empty"));
        }
        if self.max_length == 0 {
            return Err(SelectError::invalid("maximum length must be positive"));
        }
        if self.target_count == 0 {
            return Err(SelectError::invalid("target count must be positive"));
        }
        if self.kmer_size == 0 {
            return Err(SelectError::invalid("k-mer size must be positive"));
        }
        if self.checkpoint_interval == Some(0) {
            return Err(SelectError::invalid("checkpoint interval must be positive"));
        }
        if self.output == self.report {
            return Err(SelectError::invalid(format!(
                "output FASTA and report share the path {}",
                self.output.display()
            )));
        }
        self.alignment.validate().map_err(SelectError::InvalidParameter)?;

        let registry = ScorerRegistry::new();
        if !registry.has_scorer(&self.scorer) {
            return Err(SelectError::invalid(format!(
                "unknown scorer '{}'. Available: {}",
                self.scorer,
                registry.get_scorer_names().join(", ")
            )));
        }
        Ok(())
    }
}

/// Inputs loaded and filtered, ready for selection
#[derive(Debug)]
pub struct PreparedPool {
    pub records_read: usize,
    pub class_map: ClassMap,
    pub outcome: FilterOutcome,
}

/// Load sequences and classes and build the candidate pool
pub fn prepare_pool(config: &RunConfig) -> Result<PreparedPool> {
    config.validate()?;

    let store = SequenceStore::from_fasta(&config.fasta, config.strict_alphabet)?;
    let class_map = match &config.hierarchy {
        Some(path) => ClassMap::from_hierarchy(path)?,
        None => {
            info!("No hierarchy file given, reading classes from FASTA headers");
            let map = ClassMap::from_fasta_headers(&store);
            if map.stats().skipped > 0 {
                warn!(
                    "{} headers carry no sccs (first at records {:?})",
                    map.stats().skipped,
                    map.stats().first_skipped_lines
                );
            }
            map
        }
    };

    let outcome = filter(&store, &class_map, &config.classes, config.max_length)?;

    Ok(PreparedPool {
        records_read: store.len(),
        class_map,
        outcome,
    })
}

/// Result of a completed run
#[derive(Debug)]
pub struct RunOutcome {
    pub report: SelectionReport,
    pub summary: RunSummary,
}

/// Run the full selection and write every output
pub fn run_selection(config: &RunConfig) -> Result<RunOutcome> {
    let start = Instant::now();
    let prepared = prepare_pool(config)?;
    let pool = &prepared.outcome.pool;

    let registry = ScorerRegistry::with_settings(config.alignment.clone(), config.kmer_size);
    let scorer = registry
        .get_scorer(&config.scorer)
        .ok_or_else(|| SelectError::invalid(format!("unknown scorer '{}'", config.scorer)))?;
    info!("Scoring with '{}': {}", scorer.name(), scorer.description());

    let prior = if config.resume && config.report.exists() {
        let rows = read_report(&config.report)?;
        info!("Resuming from {} rows in {}", rows.len(), config.report.display());
        rows
    } else {
        if config.resume {
            info!("No report at {}, starting fresh", config.report.display());
        }
        Vec::new()
    };

    let selector = GreedySelector::new(
        scorer,
        SelectionOptions {
            balance_classes: config.balance_classes,
            show_progress: config.show_progress,
        },
    );
    let report = selector.select_with(pool, config.target_count, &prior, |partial| {
        match config.checkpoint_interval {
            Some(every) if partial.len() % every == 0 => {
                debug!("Checkpoint at {} rows", partial.len());
                write_report_checkpoint(partial, &config.report)
            }
            _ => Ok(()),
        }
    })?;

    write_outputs(&report, pool, &config.output, &config.report)?;

    let mut summary = RunSummary {
        version: crate::VERSION.to_string(),
        created: Utc::now(),
        fasta: config.fasta.display().to_string(),
        hierarchy: config.hierarchy.as_ref().map(|p| p.display().to_string()),
        scorer: config.scorer.clone(),
        classes: config.classes.iter().copied().collect(),
        max_length: config.max_length,
        balance_classes: config.balance_classes,
        records_read: prepared.records_read,
        classification: prepared.class_map.stats().clone(),
        filter: prepared.outcome.stats.clone(),
        requested: 0,
        selected: 0,
        selected_per_class: Default::default(),
        resumed: 0,
        under_selected: false,
        shortfall: None,
        pool_fingerprint: pool_fingerprint(pool),
    };
    summary.selection_outcome(&report);

    if let Some(path) = &config.summary {
        write_summary(&summary, path)?;
        info!("Run summary written to {}", path.display());
    }

    info!(
        "Selected {} of {} candidates in {:.2}s",
        report.len(),
        pool.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(RunOutcome { report, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const DOMAINS: &str = "\
>d1alpha_ a.1.1.1 (A:) globin-like
MKVLAAGIVGLLLAQ
>d2alpha_ a.1.1.2 (A:) globin-like
MKVLAAGIVGLLLAE
>d1beta__ b.1.1.1 (B:) immunoglobulin
GSHMTEYKLVVVGAG
>d1ab____ c.2.1.1 (A:) rossmann
PEPTIDEPEPTIDEW
>d1apb___ d.58.7.1 (A:) ferredoxin-like
WWYYHHKKRRDDEE
>d1small_ g.3.11.1 (A:) knottin
CCGGCCGG
>d1long__ a.2.1.1 (A:) long helical
MKVLAAGIVGLLLAQMKVLAAGIVGLLLAQMKVLAAGIVGLLLAQMKVLAAGIVGLLLAQMKVLAAGIVGLLLAQMKVLAA
>d1odd___ unclassified entry
ACDEFGHIKL
";

    fn config_in(dir: &Path, count: usize) -> RunConfig {
        let fasta = dir.join("domains.fa");
        if !fasta.exists() {
            fs::write(&fasta, DOMAINS).unwrap();
        }
        let mut config = RunConfig::new(fasta);
        config.target_count = count;
        config.scorer = "ungapped".to_string();
        config.output = dir.join("selected.fa");
        config.report = dir.join("selection.tsv");
        config
    }

    #[test]
    fn test_prepare_pool_counts() {
        let dir = tempfile::tempdir().unwrap();
        let prepared = prepare_pool(&config_in(dir.path(), 3)).unwrap();
        let stats = &prepared.outcome.stats;

        assert_eq!(prepared.records_read, 8);
        assert_eq!(stats.retained, 5);
        assert_eq!(stats.dropped_unclassified, 1);
        assert_eq!(stats.dropped_class, 1);
        assert_eq!(stats.dropped_length, 1);
        assert_eq!(stats.retained_per_class[&StructuralClass::AllAlpha], 2);
        assert_eq!(prepared.class_map.stats().skipped, 1);
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 4);
        config.summary = Some(dir.path().join("summary.json"));

        let outcome = run_selection(&config).unwrap();
        assert_eq!(outcome.report.len(), 4);
        assert!(!outcome.report.is_under_selected());
        assert_eq!(outcome.report.entries[0].id, "d1alpha_");
        assert_eq!(outcome.report.entries[0].identity, 0.0);

        let written = SequenceStore::from_fasta(&config.output, true).unwrap();
        let ids: Vec<&str> = written.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, outcome.report.ids());
        assert!(config.summary.as_ref().unwrap().exists());
        assert_eq!(outcome.summary.selected, 4);
        assert_eq!(outcome.summary.records_read, 8);
    }

    #[test]
    fn test_near_duplicate_is_chosen_last() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run_selection(&config_in(dir.path(), 5)).unwrap();
        let last = outcome.report.entries.last().unwrap();
        assert_eq!(last.id, "d2alpha_");
        assert!(last.identity > 0.9);
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 4);

        run_selection(&config).unwrap();
        let first = (fs::read(&config.output).unwrap(), fs::read(&config.report).unwrap());
        run_selection(&config).unwrap();
        let second = (fs::read(&config.output).unwrap(), fs::read(&config.report).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_shortfall_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run_selection(&config_in(dir.path(), 30)).unwrap();
        assert_eq!(outcome.report.len(), 5);
        assert!(outcome.summary.under_selected);
        assert_eq!(outcome.summary.shortfall.unwrap().available, 5);
    }

    #[test]
    fn test_empty_classes_fail_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 3);
        config.classes.clear();

        let err = run_selection(&config).unwrap_err();
        assert!(matches!(err, SelectError::InvalidParameter(_)));
        assert_eq!(err.exit_code(), 2);
        assert!(!config.output.exists());
        assert!(!config.report.exists());
    }

    #[test]
    fn test_unknown_scorer_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 3);
        config.scorer = "blast".to_string();
        assert!(matches!(
            run_selection(&config),
            Err(SelectError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_hierarchy_overrides_headers() {
        let dir = tempfile::tempdir().unwrap();
        let hierarchy = dir.path().join("dir.cla.scope.txt");
        fs::write(
            &hierarchy,
            "# SCOPe classification\n\
             d1odd___\t1odd\tA:\tb.1.1.1\t1\tcl=1\n\
             d1beta__\t1bet\tB:\tb.1.1.1\t2\tcl=1\n",
        )
        .unwrap();

        let mut config = config_in(dir.path(), 5);
        config.hierarchy = Some(hierarchy);
        let prepared = prepare_pool(&config).unwrap();
        let ids: Vec<&str> = prepared.outcome.pool.iter().map(|c| c.record.id()).collect();
        assert_eq!(ids, vec!["d1beta__", "d1odd___"]);
    }

    #[test]
    fn test_resume_matches_uninterrupted_run() {
        let fresh_dir = tempfile::tempdir().unwrap();
        let fresh = config_in(fresh_dir.path(), 4);
        run_selection(&fresh).unwrap();

        let resumed_dir = tempfile::tempdir().unwrap();
        let mut partial = config_in(resumed_dir.path(), 2);
        run_selection(&partial).unwrap();
        partial.target_count = 4;
        partial.resume = true;
        let outcome = run_selection(&partial).unwrap();

        assert_eq!(outcome.report.resumed, 2);
        assert_eq!(
            fs::read(&fresh.report).unwrap(),
            fs::read(&partial.report).unwrap()
        );
        assert_eq!(
            fs::read(&fresh.output).unwrap(),
            fs::read(&partial.output).unwrap()
        );
    }

    #[test]
    fn test_checkpoints_leave_complete_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 5);
        config.checkpoint_interval = Some(2);
        let outcome = run_selection(&config).unwrap();
        assert_eq!(read_report(&config.report).unwrap().len(), outcome.report.len());
    }
}
