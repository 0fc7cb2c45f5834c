// classification.rs - SCOP structural classes and the domain → class map

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::SequenceStore;

/// Top-level SCOPe classes (first field of an sccs string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructuralClass {
    #[serde(rename = "a")]
    AllAlpha,
    #[serde(rename = "b")]
    AllBeta,
    #[serde(rename = "c")]
    AlphaSlashBeta,
    #[serde(rename = "d")]
    AlphaPlusBeta,
    #[serde(rename = "e")]
    MultiDomain,
    #[serde(rename = "f")]
    Membrane,
    #[serde(rename = "g")]
    Small,
    #[serde(rename = "h")]
    CoiledCoil,
    #[serde(rename = "i")]
    LowResolution,
    #[serde(rename = "j")]
    Peptide,
    #[serde(rename = "k")]
    Designed,
    #[serde(rename = "l")]
    Artifact,
}

impl StructuralClass {
    pub const ALL: [StructuralClass; 12] = [
        StructuralClass::AllAlpha,
        StructuralClass::AllBeta,
        StructuralClass::AlphaSlashBeta,
        StructuralClass::AlphaPlusBeta,
        StructuralClass::MultiDomain,
        StructuralClass::Membrane,
        StructuralClass::Small,
        StructuralClass::CoiledCoil,
        StructuralClass::LowResolution,
        StructuralClass::Peptide,
        StructuralClass::Designed,
        StructuralClass::Artifact,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        let index = (code.to_ascii_lowercase() as u32).checked_sub('a' as u32)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn code(&self) -> char {
        (b'a' + *self as u8) as char
    }

    pub fn description(&self) -> &'static str {
        match self {
            StructuralClass::AllAlpha => "All alpha proteins",
            StructuralClass::AllBeta => "All beta proteins",
            StructuralClass::AlphaSlashBeta => "Alpha and beta proteins (a/b)",
            StructuralClass::AlphaPlusBeta => "Alpha and beta proteins (a+b)",
            StructuralClass::MultiDomain => "Multi-domain proteins",
            StructuralClass::Membrane => "Membrane and cell surface proteins",
            StructuralClass::Small => "Small proteins",
            StructuralClass::CoiledCoil => "Coiled coil proteins",
            StructuralClass::LowResolution => "Low resolution protein structures",
            StructuralClass::Peptide => "Peptides",
            StructuralClass::Designed => "Designed proteins",
            StructuralClass::Artifact => "Artifacts",
        }
    }

    /// Class of an sccs string such as `a.1.1.1`
    pub fn from_sccs(sccs: &str) -> Option<Self> {
        if !sccs_pattern().is_match(sccs) {
            return None;
        }
        sccs.chars().next().and_then(Self::from_code)
    }
}

impl Display for StructuralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for StructuralClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "A/B" | "a/b" => return Ok(StructuralClass::AlphaSlashBeta),
            "A+B" | "a+b" => return Ok(StructuralClass::AlphaPlusBeta),
            _ => {}
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code)
                .ok_or_else(|| format!("Unknown structural class: {}", trimmed)),
            _ => Err(format!(
                "Unknown structural class: '{}'. Use a letter a-l or one of A, B, A/B, A+B",
                trimmed
            )),
        }
    }
}

fn sccs_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-l]\.\d+\.\d+\.\d+$").expect("valid sccs regex"))
}

/// Line numbers of skipped entries kept for diagnostics
const MAX_REPORTED_SKIPS: usize = 5;

/// Counters gathered while building a class map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassMapStats {
    /// Lines (or headers) that were inspected
    pub lines_read: usize,
    pub entries: usize,
    /// Non-comment lines that did not match the accepted pattern
    pub skipped: usize,
    /// Repeated identifiers that disagreed with the first mapping
    pub conflicts: usize,
    pub first_skipped_lines: Vec<usize>,
}

impl ClassMapStats {
    pub(crate) fn record_skip(&mut self, line_num: usize) {
        self.skipped += 1;
        if self.first_skipped_lines.len() < MAX_REPORTED_SKIPS {
            self.first_skipped_lines.push(line_num);
        }
    }
}

/// Mapping from domain identifier to structural class
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    classes: HashMap<String, StructuralClass>,
    stats: ClassMapStats,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping; the first class seen for an identifier wins
    pub fn insert(&mut self, id: &str, class: StructuralClass) {
        match self.classes.get(id) {
            Some(existing) if *existing == class => {}
            Some(existing) => {
                warn!(
                    "Conflicting class for {}: keeping {}, ignoring {}",
                    id, existing, class
                );
                self.stats.conflicts += 1;
            }
            None => {
                self.classes.insert(id.to_string(), class);
                self.stats.entries += 1;
            }
        }
    }

    pub fn class_of(&self, id: &str) -> Option<StructuralClass> {
        self.classes.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn stats(&self) -> &ClassMapStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut ClassMapStats {
        &mut self.stats
    }

    /// Derive classes from ASTRAL headers (`>d1dlwa_ a.1.1.1 (A:) ...`).
    /// The first description token must be an sccs string; other headers are skipped.
    pub fn from_fasta_headers(store: &SequenceStore) -> Self {
        let mut map = Self::new();
        for (i, record) in store.records().iter().enumerate() {
            map.stats.lines_read += 1;
            let class = record
                .description()
                .and_then(|desc| desc.split_whitespace().next())
                .and_then(StructuralClass::from_sccs);
            match class {
                Some(class) => map.insert(record.id(), class),
                None => {
                    debug!("No sccs in header of {}", record.id());
                    map.stats.record_skip(i + 1);
                }
            }
        }
        map
    }
}
