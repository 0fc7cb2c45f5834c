// fasta.rs - FASTA loader for domain sequences

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bio::io::fasta;
use tracing::info;

use crate::data::{SequenceRecord, SequenceStore};
use crate::error::{Result, SelectError};

impl SequenceStore {
    /// Load a FASTA file, preserving record order.
    /// With `strict` set, residues outside the protein alphabet are rejected.
    pub fn from_fasta(path: &Path, strict: bool) -> Result<Self> {
        let file = File::open(path).map_err(|e| SelectError::io(path, e))?;
        let store = Self::from_reader(BufReader::new(file), &path.display().to_string(), strict)?;
        info!("Loaded {} sequences from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse FASTA from any reader; `origin` names the source in errors
    pub fn from_reader<R: Read>(reader: R, origin: &str, strict: bool) -> Result<Self> {
        let reader = fasta::Reader::new(reader);
        let mut store = SequenceStore::new();

        for (index, record_result) in reader.records().enumerate() {
            let record = record_result.map_err(|e| {
                SelectError::parse(origin, format!("Invalid FASTA record #{}: {}", index + 1, e))
            })?;

            let id = record.id();
            if id.is_empty() {
                return Err(SelectError::parse(
                    origin,
                    format!("Record #{} has an empty identifier", index + 1),
                ));
            }
            if record.seq().is_empty() {
                return Err(SelectError::parse(
                    origin,
                    format!("Header '{}' is not followed by any sequence lines", id),
                ));
            }

            let parsed = SequenceRecord::new(
                id,
                record.desc().map(|d| d.to_string()),
                record.seq().to_vec(),
            );

            if strict {
                if let Some((pos, residue)) = parsed.first_invalid_residue() {
                    return Err(SelectError::parse(
                        origin,
                        format!(
                            "Record '{}' has invalid residue '{}' at position {}",
                            id,
                            residue.escape_ascii(),
                            pos + 1
                        ),
                    ));
                }
            }

            if !store.push(parsed) {
                return Err(SelectError::parse(origin, format!("Duplicate identifier '{}'", id)));
            }
        }

        Ok(store)
    }
}
