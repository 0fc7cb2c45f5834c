// verify.rs - Independent check of a written selection against its report

use rayon::prelude::*;

use crate::core::selection::ReportEntry;
use crate::data::SequenceRecord;
use crate::scorers::IdentityScorer;

/// Outcome of checking an output FASTA against its report
#[derive(Debug, Clone, Default)]
pub struct Verification {
    pub rows: usize,
    /// Order, identifier, length or row count disagreements
    pub problems: Vec<String>,
    /// Largest |recorded - recomputed| identity
    pub max_deviation: f64,
    /// Order of the row with the largest deviation
    pub worst_row: Option<usize>,
}

impl Verification {
    pub fn passed(&self, tolerance: f64) -> bool {
        self.problems.is_empty() && self.max_deviation <= tolerance
    }
}

/// Recompute every recorded identity by brute force over the preceding rows
pub fn verify_selection(
    records: &[SequenceRecord],
    entries: &[ReportEntry],
    scorer: &dyn IdentityScorer,
) -> Verification {
    let mut verification = Verification {
        rows: entries.len(),
        ..Verification::default()
    };

    if records.len() != entries.len() {
        verification.problems.push(format!(
            "FASTA has {} records but the report has {} rows",
            records.len(),
            entries.len()
        ));
    }

    for (i, (record, entry)) in records.iter().zip(entries).enumerate() {
        if entry.order != i + 1 {
            verification
                .problems
                .push(format!("row {}: order is {}", i + 1, entry.order));
        }
        if entry.id != record.id() {
            verification.problems.push(format!(
                "row {}: report names '{}' but FASTA has '{}'",
                i + 1,
                entry.id,
                record.id()
            ));
        }
        if entry.length != record.len() {
            verification.problems.push(format!(
                "row {}: length {} recorded, {} in FASTA",
                i + 1,
                entry.length,
                record.len()
            ));
        }
    }
    if !verification.problems.is_empty() {
        return verification;
    }

    let recomputed: Vec<f64> = (0..records.len())
        .into_par_iter()
        .map(|k| {
            records[..k]
                .iter()
                .map(|earlier| scorer.score_records(&records[k], earlier))
                .fold(0.0, f64::max)
        })
        .collect();

    for (entry, expected) in entries.iter().zip(recomputed) {
        let deviation = (entry.identity - expected).abs();
        if deviation > verification.max_deviation {
            verification.max_deviation = deviation;
            verification.worst_row = Some(entry.order);
        }
    }

    verification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::Candidate;
    use crate::core::selection::{GreedySelector, SelectionOptions};
    use crate::data::StructuralClass;
    use crate::scorers::KmerScorer;

    fn pool() -> Vec<Candidate> {
        let seqs: [&[u8]; 5] = [
            b"MKVLAAGIVGLLLAQ",
            b"MKVLAAGIVGLLLAE",
            b"GSHMTEYKLVVVGAG",
            b"PEPTIDEPEPTIDEW",
            b"WWYYHHKKRRDDEE",
        ];
        seqs.iter()
            .enumerate()
            .map(|(i, s)| Candidate {
                record: SequenceRecord::new(format!("d{}", i + 1), None, s.to_vec()),
                class: StructuralClass::AllAlpha,
            })
            .collect()
    }

    fn selected(pool: &[Candidate], entries: &[ReportEntry]) -> Vec<SequenceRecord> {
        entries
            .iter()
            .map(|e| {
                pool.iter()
                    .find(|c| c.record.id() == e.id)
                    .unwrap()
                    .record
                    .clone()
            })
            .collect()
    }

    #[test]
    fn test_selector_output_verifies() {
        let pool = pool();
        let scorer = KmerScorer::new(2);
        let report = GreedySelector::new(&scorer, SelectionOptions::default())
            .select(&pool, 4)
            .unwrap();
        let records = selected(&pool, &report.entries);

        let verification = verify_selection(&records, &report.entries, &scorer);
        assert!(verification.problems.is_empty());
        assert!(verification.max_deviation < 1e-12);
        assert!(verification.passed(0.0));
    }

    #[test]
    fn test_tampered_identity_detected() {
        let pool = pool();
        let scorer = KmerScorer::new(2);
        let mut report = GreedySelector::new(&scorer, SelectionOptions::default())
            .select(&pool, 3)
            .unwrap();
        report.entries[2].identity += 0.25;
        let records = selected(&pool, &report.entries);

        let verification = verify_selection(&records, &report.entries, &scorer);
        assert!((verification.max_deviation - 0.25).abs() < 1e-9);
        assert_eq!(verification.worst_row, Some(3));
        assert!(!verification.passed(1e-4));
    }

    #[test]
    fn test_mismatched_rows_detected() {
        let pool = pool();
        let scorer = KmerScorer::new(2);
        let report = GreedySelector::new(&scorer, SelectionOptions::default())
            .select(&pool, 3)
            .unwrap();
        let mut records = selected(&pool, &report.entries);
        records.swap(0, 1);

        let verification = verify_selection(&records, &report.entries, &scorer);
        assert!(verification.problems.len() >= 2);
        assert!(verification.problems[0].starts_with("row 1:"));
        assert!(!verification.passed(1.0));

        records.pop();
        let short = verify_selection(&records, &report.entries, &scorer);
        assert!(!short.passed(1.0));
    }
}
