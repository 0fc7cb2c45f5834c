// filter.rs - Class and length filtering into the candidate pool

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::info;

use crate::data::{ClassMap, SequenceRecord, SequenceStore, StructuralClass};
use crate::error::{Result, SelectError};

/// A record that passed the filter, with its resolved class
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub record: SequenceRecord,
    pub class: StructuralClass,
}

/// Candidates in input file order
pub type CandidatePool = Vec<Candidate>;

/// Counters produced by a filter pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub total_seen: usize,
    pub retained: usize,
    pub dropped_unclassified: usize,
    /// Classified, but class not requested
    pub dropped_class: usize,
    /// Requested class, but longer than the maximum length
    pub dropped_length: usize,
    pub retained_per_class: BTreeMap<StructuralClass, usize>,
}

impl FilterStats {
    pub fn dropped(&self) -> usize {
        self.dropped_unclassified + self.dropped_class + self.dropped_length
    }
}

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub pool: CandidatePool,
    pub stats: FilterStats,
}

/// Keep records whose class is in `classes` and whose length is at most `max_length`
pub fn filter(
    store: &SequenceStore,
    class_map: &ClassMap,
    classes: &BTreeSet<StructuralClass>,
    max_length: usize,
) -> Result<FilterOutcome> {
    if classes.is_empty() {
        return Err(SelectError::invalid("class set must not be empty"));
    }
    if max_length == 0 {
        return Err(SelectError::invalid("maximum length must be positive"));
    }

    let mut pool = CandidatePool::new();
    let mut stats = FilterStats::default();

    for record in store.records() {
        stats.total_seen += 1;

        let class = match class_map.class_of(record.id()) {
            Some(class) => class,
            None => {
                stats.dropped_unclassified += 1;
                continue;
            }
        };
        if !classes.contains(&class) {
            stats.dropped_class += 1;
            continue;
        }
        if record.len() > max_length {
            stats.dropped_length += 1;
            continue;
        }

        stats.retained += 1;
        *stats.retained_per_class.entry(class).or_insert(0) += 1;
        pool.push(Candidate {
            record: record.clone(),
            class,
        });
    }

    info!(
        "Filter retained {} of {} sequences ({} unclassified, {} other class, {} too long)",
        stats.retained,
        stats.total_seen,
        stats.dropped_unclassified,
        stats.dropped_class,
        stats.dropped_length
    );

    Ok(FilterOutcome { pool, stats })
}
