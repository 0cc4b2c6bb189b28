//! Reporting-unit discovery from the run directory
//!
//! Each subbasin has one `NNNNN0000.sub` input file next to `file.cio`; the
//! subbasin report `output.sub` shares the extension and is not counted.

use crate::constants::{SUBBASIN_FILE_EXTENSION, SUBBASIN_OUTPUT_FILE_NAME};
use crate::error::Result;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Number of subbasin input files directly inside `dir`
pub fn count_subbasins(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_subbasin_file(entry.path()) {
            count += 1;
        }
    }

    debug!("Found {} subbasin files in {}", count, dir.display());
    Ok(count)
}

fn is_subbasin_file(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SUBBASIN_FILE_EXTENSION));
    let is_report = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(SUBBASIN_OUTPUT_FILE_NAME));
    has_extension && !is_report
}
