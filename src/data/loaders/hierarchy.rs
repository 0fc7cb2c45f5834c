// hierarchy.rs - SCOP classification file loader
//
// Accepted line layout (SCOPe dir.cla.scope):
//   sid <TAB> pdb <TAB> chain/region <TAB> sccs <TAB> ...
// e.g. "d1dlwa_\t1dlw\tA:\ta.1.1.1\t14982\tcl=46456,..."
// Blank lines and '#' comments are ignored. Any other line without at least
// four fields, a whitespace-free sid and a valid sccs is skipped and counted.
// Lines that are not valid UTF-8 count as unparsable.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::data::{ClassMap, StructuralClass};
use crate::error::{Result, SelectError};

/// Extract (identifier, class) from one classification line
fn parse_line(line: &str) -> Option<(&str, StructuralClass)> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 4 {
        return None;
    }
    let sid = fields[0].trim();
    if sid.is_empty() || sid.contains(char::is_whitespace) {
        return None;
    }
    let class = StructuralClass::from_sccs(fields[3].trim())?;
    Some((sid, class))
}

impl ClassMap {
    /// Load a classification file; unparsable lines are skipped and counted
    pub fn from_hierarchy(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SelectError::io(path, e))?;
        let map = Self::from_hierarchy_reader(BufReader::new(file), path)?;

        let stats = map.stats();
        info!(
            "Loaded {} domain classifications from {} ({} lines skipped, {} conflicts)",
            stats.entries,
            path.display(),
            stats.skipped,
            stats.conflicts
        );
        if stats.skipped > 0 {
            warn!(
                "Skipped {} unparsable classification lines (first at lines {:?})",
                stats.skipped, stats.first_skipped_lines
            );
        }
        Ok(map)
    }

    pub fn from_hierarchy_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut map = ClassMap::new();

        for (line_idx, raw) in reader.split(b'\n').enumerate() {
            let raw = raw.map_err(|e| SelectError::io(path, e))?;
            let line_num = line_idx + 1;
            let Ok(line) = std::str::from_utf8(&raw) else {
                debug!("Skipping classification line {}: not valid UTF-8", line_num);
                map.stats_mut().lines_read += 1;
                map.stats_mut().record_skip(line_num);
                continue;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            map.stats_mut().lines_read += 1;
            match parse_line(trimmed) {
                Some((sid, class)) => map.insert(sid, class),
                None => {
                    debug!("Skipping classification line {}: {}", line_num, trimmed);
                    map.stats_mut().record_skip(line_num);
                }
            }
        }

        Ok(map)
    }
}
