// summary.rs - JSON run summary

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::filter::{Candidate, FilterStats};
use crate::core::selection::{SelectionReport, Shortfall};
use crate::data::{ClassMapStats, StructuralClass};
use crate::error::{Result, SelectError};

/// Machine-readable record of one selection run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub created: DateTime<Utc>,
    pub fasta: String,
    /// None when classes came from FASTA headers
    pub hierarchy: Option<String>,
    pub scorer: String,
    pub classes: Vec<StructuralClass>,
    pub max_length: usize,
    pub balance_classes: bool,
    pub records_read: usize,
    pub classification: ClassMapStats,
    pub filter: FilterStats,
    pub requested: usize,
    pub selected: usize,
    pub selected_per_class: BTreeMap<StructuralClass, usize>,
    pub resumed: usize,
    pub under_selected: bool,
    pub shortfall: Option<Shortfall>,
    /// CRC32 over pool identifiers and residues, hex encoded
    pub pool_fingerprint: String,
}

impl RunSummary {
    pub fn selection_outcome(&mut self, report: &SelectionReport) {
        self.requested = report.requested;
        self.selected = report.len();
        self.selected_per_class = report.selected_per_class();
        self.resumed = report.resumed;
        self.under_selected = report.is_under_selected();
        self.shortfall = report.shortfall;
    }
}

/// Fingerprint of a candidate pool, stable across runs on the same input
pub fn pool_fingerprint(pool: &[Candidate]) -> String {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    for candidate in pool {
        hasher.update(candidate.record.id().as_bytes());
        hasher.update(b"\t");
        hasher.update(candidate.record.residues());
        hasher.update(b"\n");
    }
    format!("{:08x}", hasher.finalize())
}

pub fn write_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| SelectError::Output(vec![format!("{}: {}", path.display(), e)]))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SelectError::io(parent, e))?;
        }
    }
    fs::write(path, json + "\n").map_err(|e| SelectError::io(path, e))?;
    Ok(())
}
