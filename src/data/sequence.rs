// sequence.rs - Domain sequence records and the in-memory sequence store

use std::collections::HashMap;

/// Residues accepted in strict alphabet mode (20 standard + ambiguity/rare codes)
pub const PROTEIN_ALPHABET: &[u8] = b"ACDEFGHIKLMNPQRSTVWYBZXUO";

/// A single domain sequence as read from FASTA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    id: String,
    description: Option<String>,
    residues: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, description: Option<String>, residues: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            description,
            residues,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header text after the identifier, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Position and byte of the first residue outside the protein alphabet
    pub fn first_invalid_residue(&self) -> Option<(usize, u8)> {
        self.residues
            .iter()
            .position(|r| !PROTEIN_ALPHABET.contains(&r.to_ascii_uppercase()))
            .map(|pos| (pos, self.residues[pos]))
    }
}

/// Ordered collection of records with an identifier index
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    records: Vec<SequenceRecord>,
    index: HashMap<String, usize>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; returns false (and leaves the store untouched) on a duplicate id
    pub fn push(&mut self, record: SequenceRecord) -> bool {
        if self.index.contains_key(record.id()) {
            return false;
        }
        self.index.insert(record.id().to_string(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, id: &str) -> Option<&SequenceRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Records in file order
    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
