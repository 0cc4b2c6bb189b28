//! Session configuration.
//!
//! Every decode session receives its own [`ReaderConfig`] by value; nothing
//! in the crate reads process-wide settings.

use crate::constants::{
    CIO_FILE_NAME, CIO_SKIP_LINES, OUTPUT_PREAMBLE_LINES, REACH_OUTPUT_FILE_NAME,
    SUMMARY_STEP_LIMIT,
};
use serde::{Deserialize, Serialize};

/// Settings for reading one SWAT run directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Run configuration file name inside the run directory
    pub cio_file: String,

    /// Output report decoded by the session
    pub output_file: String,

    /// Zero-based `file.cio` line indices that carry no setting
    pub cio_skip_lines: Vec<usize>,

    /// Header lines before the first output record
    pub preamble_lines: usize,

    /// Compact rows with a step index above this are summary rows
    pub step_limit: f64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            cio_file: CIO_FILE_NAME.to_string(),
            output_file: REACH_OUTPUT_FILE_NAME.to_string(),
            cio_skip_lines: CIO_SKIP_LINES.to_vec(),
            preamble_lines: OUTPUT_PREAMBLE_LINES,
            step_limit: SUMMARY_STEP_LIMIT,
        }
    }
}

impl ReaderConfig {
    /// Read a different output report (e.g. a renamed `output.rch`)
    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Read the run configuration from a different file name
    pub fn with_cio_file(mut self, cio_file: impl Into<String>) -> Self {
        self.cio_file = cio_file.into();
        self
    }

    /// Override the skipped `file.cio` line indices
    pub fn with_cio_skip_lines(mut self, lines: Vec<usize>) -> Self {
        self.cio_skip_lines = lines;
        self
    }

    /// Set the number of preamble lines in the output report
    pub fn with_preamble_lines(mut self, preamble_lines: usize) -> Self {
        self.preamble_lines = preamble_lines;
        self
    }

    /// Set the summary-row step threshold
    pub fn with_step_limit(mut self, step_limit: f64) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Whether a zero-based `file.cio` line index is skipped
    pub fn skips_cio_line(&self, index: usize) -> bool {
        self.cio_skip_lines.contains(&index)
    }
}
