// selection.rs - Greedy max-min diversity selection
//
// Each step picks the remaining candidate whose highest identity to the
// already-selected set is lowest. Running maxima are updated against the
// newest member only, so a step costs O(remaining) scorer calls.

use std::collections::{BTreeMap, HashMap};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::filter::Candidate;
use crate::data::StructuralClass;
use crate::error::{Result, SelectError};
use crate::scorers::IdentityScorer;

/// One row of the selection report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// 1-based selection order
    pub order: usize,
    pub id: String,
    pub class: StructuralClass,
    pub length: usize,
    /// Highest identity to the members selected before this one (0.0 for the seed)
    pub identity: f64,
}

/// Fewer candidates were available than requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub requested: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionReport {
    pub entries: Vec<ReportEntry>,
    pub requested: usize,
    pub shortfall: Option<Shortfall>,
    /// Rows carried over from a previous run
    pub resumed: usize,
}

impl SelectionReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_under_selected(&self) -> bool {
        self.shortfall.is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn selected_per_class(&self) -> BTreeMap<StructuralClass, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.class).or_insert(0) += 1;
        }
        counts
    }
}

/// Selected members plus the running best similarity of every pool index
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: Vec<usize>,
    best: Vec<f64>,
    /// Unselected pool indices, ascending
    remaining: Vec<usize>,
}

impl SelectionState {
    pub fn new(pool_len: usize) -> Self {
        Self {
            selected: Vec::new(),
            best: vec![0.0; pool_len],
            remaining: (0..pool_len).collect(),
        }
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    /// Running max identity of a pool index to the selected set
    pub fn similarity(&self, pool_index: usize) -> f64 {
        self.best[pool_index]
    }

    fn is_selected(&self, pool_index: usize) -> bool {
        self.remaining.binary_search(&pool_index).is_err()
    }

    fn mark_selected(&mut self, pool_index: usize) {
        if let Ok(pos) = self.remaining.binary_search(&pool_index) {
            self.remaining.remove(pos);
            self.selected.push(pool_index);
        }
    }

    /// Fold the newest member into every remaining candidate's running max.
    /// Candidates are scored independently, so the result does not depend on thread count.
    fn absorb(&mut self, pool: &[Candidate], newest: usize, scorer: &dyn IdentityScorer) {
        let member = &pool[newest].record;
        let scores: Vec<(usize, f64)> = self
            .remaining
            .par_iter()
            .map(|&i| (i, scorer.score_records(&pool[i].record, member)))
            .collect();

        for (i, score) in scores {
            if score > self.best[i] {
                self.best[i] = score;
            }
        }
    }

    /// Eligible remaining candidate with the lowest running max; earliest pool index wins ties
    fn least_similar(&self, eligible: impl Fn(usize) -> bool) -> Option<usize> {
        let mut choice: Option<usize> = None;
        for &i in &self.remaining {
            if !eligible(i) {
                continue;
            }
            match choice {
                Some(c) if self.best[i] >= self.best[c] => {}
                _ => choice = Some(i),
            }
        }
        choice
    }
}

/// Per-class slot counts proportional to pool composition (largest remainder).
/// Equal remainders go to the earlier class.
pub fn class_quotas(pool: &[Candidate], slots: usize) -> BTreeMap<StructuralClass, usize> {
    let mut counts: BTreeMap<StructuralClass, usize> = BTreeMap::new();
    for candidate in pool {
        *counts.entry(candidate.class).or_insert(0) += 1;
    }

    let total = pool.len();
    let mut quotas = BTreeMap::new();
    if total == 0 {
        return quotas;
    }

    let mut remainders = Vec::with_capacity(counts.len());
    let mut assigned = 0;
    for (&class, &count) in &counts {
        let share = slots * count;
        quotas.insert(class, share / total);
        assigned += share / total;
        remainders.push((share % total, class));
    }

    // Largest remainder first, class order breaks ties
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, class) in remainders.into_iter().take(slots.saturating_sub(assigned)) {
        if let Some(quota) = quotas.get_mut(&class) {
            *quota += 1;
        }
    }

    quotas
}

#[derive(Debug, Clone, Default)]
pub struct SelectionOptions {
    /// Restrict each class to its proportional share of the output
    pub balance_classes: bool,
    pub show_progress: bool,
}

pub struct GreedySelector<'a> {
    scorer: &'a dyn IdentityScorer,
    options: SelectionOptions,
}

impl<'a> GreedySelector<'a> {
    pub fn new(scorer: &'a dyn IdentityScorer, options: SelectionOptions) -> Self {
        Self { scorer, options }
    }

    pub fn select(&self, pool: &[Candidate], target_count: usize) -> Result<SelectionReport> {
        self.select_with(pool, target_count, &[], |_| Ok(()))
    }

    /// Continue a run from previously reported rows
    pub fn select_resuming(
        &self,
        pool: &[Candidate],
        prior: &[ReportEntry],
        target_count: usize,
    ) -> Result<SelectionReport> {
        self.select_with(pool, target_count, prior, |_| Ok(()))
    }

    /// Full selection loop. `on_step` sees the report after every appended row.
    pub fn select_with<F>(
        &self,
        pool: &[Candidate],
        target_count: usize,
        prior: &[ReportEntry],
        mut on_step: F,
    ) -> Result<SelectionReport>
    where
        F: FnMut(&SelectionReport) -> Result<()>,
    {
        if target_count == 0 {
            return Err(SelectError::invalid("target count must be positive"));
        }
        if prior.len() > target_count {
            return Err(SelectError::invalid(format!(
                "previous report already holds {} rows, more than the requested {}",
                prior.len(),
                target_count
            )));
        }

        let mut report = SelectionReport {
            entries: Vec::new(),
            requested: target_count,
            shortfall: None,
            resumed: prior.len(),
        };
        if target_count > pool.len() {
            warn!(
                "Requested {} sequences but only {} candidates passed the filter",
                target_count,
                pool.len()
            );
            report.shortfall = Some(Shortfall {
                requested: target_count,
                available: pool.len(),
            });
        }
        if pool.is_empty() {
            return Ok(report);
        }

        let slots = target_count.min(pool.len());
        let mut quotas = if self.options.balance_classes {
            let quotas = class_quotas(pool, slots);
            info!("Class quotas: {:?}", quotas);
            Some(quotas)
        } else {
            None
        };

        let mut state = SelectionState::new(pool.len());
        self.restore(pool, prior, &mut state, &mut report, quotas.as_mut())?;

        let pb = if self.options.show_progress {
            let pb = ProgressBar::new(slots as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} selected ETA: {eta}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_position(report.len() as u64);

        while report.len() < slots {
            let has_quota = |i: usize| match &quotas {
                Some(q) => q.get(&pool[i].class).copied().unwrap_or(0) > 0,
                None => true,
            };

            // Seed: first eligible candidate in pool order, recorded with identity 0.0
            let pick = if state.selected().is_empty() {
                state.remaining().iter().copied().find(|&i| has_quota(i))
            } else {
                state.least_similar(has_quota)
            };
            let Some(pick) = pick else {
                warn!("No eligible candidate left after {} selections", report.len());
                break;
            };

            let candidate = &pool[pick];
            let identity = state.similarity(pick);
            state.mark_selected(pick);
            if let Some(q) = quotas.as_mut() {
                if let Some(slot) = q.get_mut(&candidate.class) {
                    *slot -= 1;
                }
            }

            report.entries.push(ReportEntry {
                order: report.entries.len() + 1,
                id: candidate.record.id().to_string(),
                class: candidate.class,
                length: candidate.record.len(),
                identity,
            });
            debug!(
                "Selected #{}: {} (class {}, max identity to set {:.4})",
                report.len(),
                candidate.record.id(),
                candidate.class,
                identity
            );

            state.absorb(pool, pick, self.scorer);
            pb.inc(1);
            on_step(&report)?;
        }

        pb.finish_and_clear();
        info!(
            "Selected {} of {} requested sequences",
            report.len(),
            target_count
        );
        Ok(report)
    }

    /// Re-seed the state from prior rows and bring running maxima up to date
    fn restore(
        &self,
        pool: &[Candidate],
        prior: &[ReportEntry],
        state: &mut SelectionState,
        report: &mut SelectionReport,
        mut quotas: Option<&mut BTreeMap<StructuralClass, usize>>,
    ) -> Result<()> {
        if prior.is_empty() {
            return Ok(());
        }

        let index: HashMap<&str, usize> = pool
            .iter()
            .enumerate()
            .map(|(i, c)| (c.record.id(), i))
            .collect();

        for (expected_order, entry) in (1..).zip(prior) {
            if entry.order != expected_order {
                return Err(SelectError::invalid(format!(
                    "previous report row for '{}' has order {}, expected {}",
                    entry.id, entry.order, expected_order
                )));
            }
            let &pool_index = index.get(entry.id.as_str()).ok_or_else(|| {
                SelectError::invalid(format!(
                    "previously selected '{}' is not in the candidate pool",
                    entry.id
                ))
            })?;
            if state.is_selected(pool_index) {
                return Err(SelectError::invalid(format!(
                    "'{}' appears twice in the previous report",
                    entry.id
                )));
            }
            let current = &pool[pool_index];
            if entry.length != current.record.len() || entry.class != current.class {
                return Err(SelectError::invalid(format!(
                    "previous report row for '{}' ({}, length {}) does not match the input ({}, length {})",
                    entry.id,
                    entry.class.code(),
                    entry.length,
                    current.class.code(),
                    current.record.len()
                )));
            }

            state.mark_selected(pool_index);
            if let Some(q) = quotas.as_deref_mut() {
                if let Some(slot) = q.get_mut(&pool[pool_index].class) {
                    *slot = slot.saturating_sub(1);
                }
            }
            report.entries.push(entry.clone());
        }

        let members = state.selected().to_vec();
        for member in members {
            state.absorb(pool, member, self.scorer);
        }
        info!("Resumed from {} previously selected sequences", prior.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SequenceRecord;
    use crate::scorers::{GlobalIdentityScorer, KmerScorer, UngappedScorer};

    fn candidate(id: &str, seq: &[u8], class: StructuralClass) -> Candidate {
        Candidate {
            record: SequenceRecord::new(id, None, seq.to_vec()),
            class,
        }
    }

    fn alpha_pool(seqs: &[(&str, &[u8])]) -> Vec<Candidate> {
        seqs.iter()
            .map(|(id, seq)| candidate(id, seq, StructuralClass::AllAlpha))
            .collect()
    }

    /// Five sequences of equal length: s1/s2 differ at one position,
    /// s3-s5 are rotations sharing no aligned position with anything else.
    fn outlier_pool() -> Vec<Candidate> {
        alpha_pool(&[
            ("s1", b"ACDEFGHIKLMNPQRSTVWY"),
            ("s2", b"WCDEFGHIKLMNPQRSTVWY"),
            ("s3", b"GHIKLMNPQRSTVWYACDEF"),
            ("s4", b"MNPQRSTVWYACDEFGHIKL"),
            ("s5", b"STVWYACDEFGHIKLMNPQR"),
        ])
    }

    fn mixed_pool() -> Vec<Candidate> {
        alpha_pool(&[
            ("m1", b"MKVLAAGIVGLLLAQ"),
            ("m2", b"MKVLAAGIVGALLAQ"),
            ("m3", b"GSHMTEYKLVVVGAG"),
            ("m4", b"PEPTIDEPEPTIDE"),
            ("m5", b"MKVLSAGIVG"),
            ("m6", b"GSHMTEYKLVVVGAGGVGKS"),
            ("m7", b"WWCCHHPPWWCCHHPP"),
            ("m8", b"ACDEFGHIK"),
        ])
    }

    #[test]
    fn test_empty_pool() {
        let scorer = UngappedScorer;
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let report = selector.select(&[], 3).unwrap();
        assert!(report.is_empty());
        assert!(report.is_under_selected());
    }

    #[test]
    fn test_zero_target_is_invalid() {
        let scorer = UngappedScorer;
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        assert!(matches!(
            selector.select(&outlier_pool(), 0),
            Err(SelectError::InvalidParameter(_))
        ));
        assert!(matches!(
            selector.select(&[], 0),
            Err(SelectError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_outliers_before_near_duplicate() {
        let scorer = UngappedScorer;
        let pool = outlier_pool();
        assert!(scorer.score_records(&pool[0].record, &pool[1].record) > 0.9);

        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let report = selector.select(&pool, 3).unwrap();

        assert_eq!(report.ids(), vec!["s1", "s3", "s4"]);
        assert!(!report.ids().contains(&"s2"));
        assert_eq!(report.entries[0].identity, 0.0);
        assert!(!report.is_under_selected());
    }

    #[test]
    fn test_outliers_before_near_duplicate_with_alignment() {
        let scorer = GlobalIdentityScorer::default();
        let pool = alpha_pool(&[
            ("s1", b"ACDEFGHIKLMNPQRSTVWY"),
            ("s2", b"WCDEFGHIKLMNPQRSTVWY"),
            ("w", b"WWWWWWWWWWWWWWWWWWWW"),
            ("c", b"CCCCCCCCCCCCCCCCCCCC"),
            ("h", b"HHHHHHHHHHHHHHHHHHHH"),
        ]);
        assert!(scorer.score_records(&pool[0].record, &pool[1].record) > 0.9);

        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let report = selector.select(&pool, 4).unwrap();

        assert_eq!(report.len(), 4);
        assert_eq!(report.ids()[0], "s1");
        assert!(!report.ids().contains(&"s2"));
        for entry in &report.entries[1..] {
            assert!(entry.identity < 0.2, "{} scored {}", entry.id, entry.identity);
        }
    }

    #[test]
    fn test_no_duplicates_and_length() {
        let scorer = KmerScorer::new(2);
        let pool = mixed_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());

        for target in 1..=pool.len() + 2 {
            let report = selector.select(&pool, target).unwrap();
            assert_eq!(report.len(), target.min(pool.len()));
            let mut ids = report.ids();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), report.len());
            let orders: Vec<usize> = report.entries.iter().map(|e| e.order).collect();
            assert_eq!(orders, (1..=report.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_recorded_identity_matches_brute_force() {
        let pool = mixed_pool();
        let scorers: Vec<Box<dyn IdentityScorer>> =
            vec![Box::new(UngappedScorer), Box::new(KmerScorer::new(3))];

        for scorer in &scorers {
            let selector = GreedySelector::new(scorer.as_ref(), SelectionOptions::default());
            let report = selector.select(&pool, pool.len()).unwrap();
            let record = |id: &str| &pool.iter().find(|c| c.record.id() == id).unwrap().record;

            for (k, entry) in report.entries.iter().enumerate() {
                let expected = report.entries[..k]
                    .iter()
                    .map(|prev| scorer.score_records(record(&entry.id), record(&prev.id)))
                    .fold(0.0, f64::max);
                assert_eq!(entry.identity, expected, "{} at step {}", entry.id, k + 1);
            }
        }
    }

    #[test]
    fn test_each_step_picks_the_minimum() {
        let scorer = UngappedScorer;
        let pool = mixed_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let report = selector.select(&pool, pool.len()).unwrap();

        for k in 1..report.len() {
            let chosen: Vec<&str> = report.ids()[..k].to_vec();
            let max_to_set = |c: &Candidate| {
                chosen
                    .iter()
                    .map(|id| {
                        let member = &pool.iter().find(|m| m.record.id() == *id).unwrap().record;
                        scorer.score_records(&c.record, member)
                    })
                    .fold(0.0, f64::max)
            };
            let best = pool
                .iter()
                .filter(|c| !chosen.contains(&c.record.id()))
                .map(max_to_set)
                .fold(f64::INFINITY, f64::min);
            assert_eq!(report.entries[k].identity, best);
        }
    }

    #[test]
    fn test_deterministic() {
        let scorer = KmerScorer::new(2);
        let pool = mixed_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        assert_eq!(selector.select(&pool, 5).unwrap(), selector.select(&pool, 5).unwrap());
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let scorer = KmerScorer::new(2);
        let pool = mixed_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());

        let run = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| selector.select(&pool, 6).unwrap())
        };
        assert_eq!(run(1), run(4));
    }

    #[test]
    fn test_target_larger_than_pool() {
        let scorer = UngappedScorer;
        let pool = outlier_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let report = selector.select(&pool, 10).unwrap();

        assert_eq!(report.len(), 5);
        assert_eq!(
            report.shortfall,
            Some(Shortfall {
                requested: 10,
                available: 5
            })
        );
    }

    #[test]
    fn test_all_identical_uses_pool_order() {
        let scorer = UngappedScorer;
        let pool = alpha_pool(&[
            ("x1", b"MKVL"),
            ("x2", b"MKVL"),
            ("x3", b"MKVL"),
            ("x4", b"MKVL"),
        ]);
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let report = selector.select(&pool, 4).unwrap();

        assert_eq!(report.ids(), vec!["x1", "x2", "x3", "x4"]);
        let identities: Vec<f64> = report.entries.iter().map(|e| e.identity).collect();
        assert_eq!(identities, vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_tie_break_by_pool_order() {
        let scorer = UngappedScorer;
        // t2 and t3 are equally dissimilar from t1
        let pool = alpha_pool(&[("t1", b"AAAA"), ("t2", b"CCCC"), ("t3", b"DDDD")]);
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        assert_eq!(selector.select(&pool, 2).unwrap().ids(), vec!["t1", "t2"]);
    }

    #[test]
    fn test_class_quotas() {
        let mut pool = Vec::new();
        for i in 0..6 {
            pool.push(candidate(&format!("a{}", i), b"MK", StructuralClass::AllAlpha));
        }
        for i in 0..3 {
            pool.push(candidate(&format!("b{}", i), b"MK", StructuralClass::AllBeta));
        }
        pool.push(candidate("d0", b"MK", StructuralClass::AlphaPlusBeta));

        let quotas = class_quotas(&pool, 5);
        assert_eq!(quotas[&StructuralClass::AllAlpha], 3);
        assert_eq!(quotas[&StructuralClass::AllBeta], 2);
        assert_eq!(quotas[&StructuralClass::AlphaPlusBeta], 0);
        assert_eq!(quotas.values().sum::<usize>(), 5);

        let all = class_quotas(&pool, 10);
        assert_eq!(all[&StructuralClass::AllAlpha], 6);
        assert_eq!(all[&StructuralClass::AlphaPlusBeta], 1);
    }

    #[test]
    fn test_balanced_selection_respects_quotas() {
        let scorer = UngappedScorer;
        let pool = vec![
            candidate("a1", b"AAAAAAAA", StructuralClass::AllAlpha),
            candidate("a2", b"CCCCCCCC", StructuralClass::AllAlpha),
            candidate("a3", b"DDDDDDDD", StructuralClass::AllAlpha),
            candidate("a4", b"EEEEEEEE", StructuralClass::AllAlpha),
            candidate("b1", b"AAAAAAAF", StructuralClass::AllBeta),
            candidate("b2", b"AAAAAAGG", StructuralClass::AllBeta),
        ];
        let options = SelectionOptions {
            balance_classes: true,
            ..Default::default()
        };
        let selector = GreedySelector::new(&scorer, options);
        let report = selector.select(&pool, 3).unwrap();

        let per_class = report.selected_per_class();
        assert_eq!(per_class[&StructuralClass::AllAlpha], 2);
        assert_eq!(per_class[&StructuralClass::AllBeta], 1);

        // Unbalanced run picks only alpha domains
        let plain = GreedySelector::new(&scorer, SelectionOptions::default());
        let unbalanced = plain.select(&pool, 3).unwrap();
        assert_eq!(unbalanced.ids(), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_resume_matches_uninterrupted_run() {
        let scorer = KmerScorer::new(2);
        let pool = mixed_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());

        let full = selector.select(&pool, 6).unwrap();
        let partial = selector.select(&pool, 2).unwrap();
        let resumed = selector.select_resuming(&pool, &partial.entries, 6).unwrap();

        assert_eq!(resumed.entries, full.entries);
        assert_eq!(resumed.resumed, 2);
    }

    #[test]
    fn test_resume_rejects_unknown_or_repeated_ids() {
        let scorer = UngappedScorer;
        let pool = outlier_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());

        let mut prior = selector.select(&pool, 2).unwrap().entries;
        prior[1].id = "missing".to_string();
        assert!(matches!(
            selector.select_resuming(&pool, &prior, 4),
            Err(SelectError::InvalidParameter(_))
        ));

        let mut repeated = selector.select(&pool, 2).unwrap().entries;
        repeated[1].id = repeated[0].id.clone();
        assert!(selector.select_resuming(&pool, &repeated, 4).is_err());

        let too_many = selector.select(&pool, 3).unwrap().entries;
        assert!(selector.select_resuming(&pool, &too_many, 2).is_err());
    }

    #[test]
    fn test_resume_rejects_rows_from_other_input() {
        let scorer = UngappedScorer;
        let pool = outlier_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());
        let prior = selector.select(&pool, 2).unwrap().entries;

        let mut wrong_length = prior.clone();
        wrong_length[1].length += 1;
        assert!(matches!(
            selector.select_resuming(&pool, &wrong_length, 4),
            Err(SelectError::InvalidParameter(_))
        ));

        let mut wrong_class = prior.clone();
        wrong_class[0].class = StructuralClass::AllBeta;
        assert!(matches!(
            selector.select_resuming(&pool, &wrong_class, 4),
            Err(SelectError::InvalidParameter(_))
        ));

        assert!(selector.select_resuming(&pool, &prior, 4).is_ok());
    }

    #[test]
    fn test_on_step_sees_every_row() {
        let scorer = UngappedScorer;
        let pool = outlier_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());

        let mut seen = Vec::new();
        selector
            .select_with(&pool, 4, &[], |report| {
                seen.push(report.len());
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_on_step_error_aborts() {
        let scorer = UngappedScorer;
        let pool = outlier_pool();
        let selector = GreedySelector::new(&scorer, SelectionOptions::default());

        let result = selector.select_with(&pool, 4, &[], |report| {
            if report.len() == 2 {
                Err(SelectError::invalid("stop"))
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
    }
}
