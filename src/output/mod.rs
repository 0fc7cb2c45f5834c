// mod.rs - Output writers: selected FASTA, selection report, run summary

pub mod summary;
pub mod verify;

pub use summary::{write_summary, RunSummary};
pub use verify::{verify_selection, Verification};

use std::collections::HashMap;
use std::fs::{self, create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bio::io::fasta;
use tracing::{info, warn};

use crate::core::filter::Candidate;
use crate::core::selection::{ReportEntry, SelectionReport};
use crate::data::StructuralClass;
use crate::error::{Result, SelectError};

pub const REPORT_HEADER: [&str; 5] = ["Order", "Domain_ID", "Class", "Length", "Max_Identity_to_Set"];

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Sibling path used while a destination is being written
fn staging_path(path: &Path) -> PathBuf {
    sibling_path(path, ".partial")
}

/// Where an existing FASTA is parked until the report is committed
fn previous_path(path: &Path) -> PathBuf {
    sibling_path(path, ".previous")
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write selected records in selection order
pub fn write_fasta_to<W: Write>(
    writer: W,
    report: &SelectionReport,
    pool: &[Candidate],
) -> io::Result<()> {
    let by_id: HashMap<&str, &Candidate> = pool.iter().map(|c| (c.record.id(), c)).collect();
    let mut fasta_writer = fasta::Writer::new(writer);

    for entry in &report.entries {
        let candidate = by_id.get(entry.id.as_str()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("selected '{}' is not in the candidate pool", entry.id),
            )
        })?;
        let record = &candidate.record;
        fasta_writer.write(record.id(), record.description(), record.residues())?;
    }

    fasta_writer.flush()
}

/// Write the tab-separated selection report
pub fn write_report_to<W: Write>(writer: W, report: &SelectionReport) -> io::Result<()> {
    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    tsv.write_record(REPORT_HEADER)?;
    for entry in &report.entries {
        tsv.write_record(&[
            entry.order.to_string(),
            entry.id.clone(),
            entry.class.to_string(),
            entry.length.to_string(),
            format!("{:.4}", entry.identity),
        ])?;
    }

    tsv.flush()
}

fn stage_file<F>(path: &Path, write: F) -> io::Result<PathBuf>
where
    F: FnOnce(BufWriter<File>) -> io::Result<()>,
{
    ensure_parent_dir(path)?;
    let staging = staging_path(path);
    let file = File::create(&staging)?;
    if let Err(e) = write(BufWriter::new(file)) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    Ok(staging)
}

/// Write the FASTA and the report together.
/// Both are staged next to their destinations and only renamed into place
/// once both were written; on failure nothing is committed and every failed
/// destination is reported.
///
/// The FASTA is renamed first. An existing FASTA is parked as `<name>.previous`
/// until the report rename succeeds, and is put back if it fails, so a failed
/// commit leaves the previous pair of files as it was.
pub fn write_outputs(
    report: &SelectionReport,
    pool: &[Candidate],
    fasta_path: &Path,
    report_path: &Path,
) -> Result<()> {
    let fasta_stage = stage_file(fasta_path, |w| write_fasta_to(w, report, pool));
    let report_stage = stage_file(report_path, |w| write_report_to(w, report));

    let (fasta_staged, report_staged) = match (fasta_stage, report_stage) {
        (Ok(f), Ok(r)) => (f, r),
        (fasta_result, report_result) => {
            let mut failures = Vec::new();
            for (result, path) in [(fasta_result, fasta_path), (report_result, report_path)] {
                match result {
                    Ok(staged) => {
                        let _ = fs::remove_file(staged);
                    }
                    Err(e) => failures.push(format!("{}: {}", path.display(), e)),
                }
            }
            return Err(SelectError::Output(failures));
        }
    };

    let discard_staged = || {
        let _ = fs::remove_file(&fasta_staged);
        let _ = fs::remove_file(&report_staged);
    };

    let parked = previous_path(fasta_path);
    let had_previous = fasta_path.is_file();
    if had_previous {
        if let Err(e) = fs::rename(fasta_path, &parked) {
            discard_staged();
            return Err(SelectError::Output(vec![format!("{}: {}", fasta_path.display(), e)]));
        }
    }

    if let Err(e) = fs::rename(&fasta_staged, fasta_path) {
        discard_staged();
        let mut failures = vec![format!("{}: {}", fasta_path.display(), e)];
        if had_previous {
            if let Err(e) = fs::rename(&parked, fasta_path) {
                failures.push(format!("{}: restore failed: {}", fasta_path.display(), e));
            }
        }
        return Err(SelectError::Output(failures));
    }

    if let Err(e) = fs::rename(&report_staged, report_path) {
        discard_staged();
        let mut failures = vec![format!("{}: {}", report_path.display(), e)];
        let rollback = if had_previous {
            fs::rename(&parked, fasta_path)
        } else {
            fs::remove_file(fasta_path)
        };
        if let Err(e) = rollback {
            warn!("Could not roll back {}: {}", fasta_path.display(), e);
            failures.push(format!("{}: rollback failed: {}", fasta_path.display(), e));
        }
        return Err(SelectError::Output(failures));
    }

    if had_previous {
        let _ = fs::remove_file(&parked);
    }

    info!(
        "Wrote {} sequences to {} and report to {}",
        report.len(),
        fasta_path.display(),
        report_path.display()
    );
    Ok(())
}

/// Replace the report file with the rows selected so far
pub fn write_report_checkpoint(report: &SelectionReport, report_path: &Path) -> Result<()> {
    let staged = stage_file(report_path, |w| write_report_to(w, report))
        .map_err(|e| SelectError::io(report_path, e))?;
    fs::rename(&staged, report_path).map_err(|e| SelectError::io(report_path, e))?;
    Ok(())
}

/// Read a selection report written by `write_report_to`
pub fn read_report(path: &Path) -> Result<Vec<ReportEntry>> {
    let file = File::open(path).map_err(|e| SelectError::io(path, e))?;
    read_report_from(file, &path.display().to_string())
}

pub fn read_report_from<R: io::Read>(reader: R, origin: &str) -> Result<Vec<ReportEntry>> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);

    let headers = tsv
        .headers()
        .map_err(|e| SelectError::parse(origin, format!("Failed to read header: {}", e)))?;
    if headers.iter().ne(REPORT_HEADER) {
        return Err(SelectError::parse(
            origin,
            format!("Unexpected report header: {:?}", headers),
        ));
    }

    let mut entries = Vec::new();
    for (row_idx, row) in tsv.records().enumerate() {
        let line_num = row_idx + 2;
        let row = row.map_err(|e| SelectError::parse(origin, format!("Line {}: {}", line_num, e)))?;
        let field = |i: usize| row.get(i).unwrap_or("").trim();
        let bad = |what: &str| {
            let raw = row.iter().collect::<Vec<_>>().join("\t");
            SelectError::parse(origin, format!("Line {}: invalid {} '{}'", line_num, what, raw))
        };

        let order = field(0).parse::<usize>().map_err(|_| bad("order"))?;
        let id = field(1).to_string();
        if id.is_empty() {
            return Err(bad("identifier"));
        }
        let class = field(2).parse::<StructuralClass>().map_err(|_| bad("class"))?;
        let length = field(3).parse::<usize>().map_err(|_| bad("length"))?;
        let identity = field(4).parse::<f64>().map_err(|_| bad("identity"))?;
        if !(0.0..=1.0).contains(&identity) {
            return Err(bad("identity"));
        }

        entries.push(ReportEntry {
            order,
            id,
            class,
            length,
            identity,
        });
    }

    if entries.is_empty() {
        warn!("Report {} has no rows", origin);
    }
    Ok(entries)
}
