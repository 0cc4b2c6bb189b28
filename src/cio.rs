//! Run configuration (`file.cio`) parsing.
//!
//! `file.cio` is line-indexed: a fixed set of line positions hold titles,
//! section dividers and file lists, every other line is a setting of the form
//! `<value> | <KEY> : <description>`. Values are kept as trimmed strings and
//! converted on demand, since some numeric-looking settings (the calendar
//! flag) are compared as raw strings.

use crate::config::ReaderConfig;
use crate::constants::{CALENDAR_FLAG_ON, CIO_KEY_TERMINATOR, CIO_VALUE_SEPARATOR, cio_keys};
use crate::error::{Result, SwatError};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings parsed from one `file.cio`
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    path: PathBuf,
    settings: BTreeMap<String, String>,
}

/// Parse the run configuration at `path`
pub fn parse_run_config(path: &Path, config: &ReaderConfig) -> Result<RunConfig> {
    let file = File::open(path).map_err(|source| SwatError::ConfigUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut settings = BTreeMap::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| SwatError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if config.skips_cio_line(index) {
            continue;
        }

        let (key, value) = parse_setting_line(&line).map_err(|reason| SwatError::Format {
            path: path.to_path_buf(),
            line: index + 1,
            reason,
        })?;

        if let Some(previous) = settings.insert(key.to_string(), value.to_string()) {
            debug!("Setting {} redefined (was '{}')", key, previous);
        }
    }

    debug!(
        "Parsed {} settings from {}",
        settings.len(),
        path.display()
    );

    Ok(RunConfig {
        path: path.to_path_buf(),
        settings,
    })
}

/// Split `value | KEY : description` into `(KEY, value)`
fn parse_setting_line(line: &str) -> std::result::Result<(&str, &str), String> {
    let (value, rest) = line
        .split_once(CIO_VALUE_SEPARATOR)
        .ok_or_else(|| format!("expected '{CIO_VALUE_SEPARATOR}' separator, found '{line}'"))?;

    let (key, _description) = rest.split_once(CIO_KEY_TERMINATOR).ok_or_else(|| {
        format!(
            "expected '{CIO_KEY_TERMINATOR}' after the key, found '{}'",
            rest.trim()
        )
    })?;

    Ok((key.trim(), value.trim()))
}

impl RunConfig {
    /// Build a configuration from already-parsed settings
    pub fn from_settings<I, K, V>(path: impl Into<PathBuf>, settings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            path: path.into(),
            settings: settings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// File the settings were read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// All settings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw value of a setting that must be present
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| SwatError::Configuration {
            path: self.path.clone(),
            key: key.to_string(),
            message: "required setting is missing".to_string(),
        })
    }

    /// Integer value of a setting that must be present
    pub fn require_int(&self, key: &str) -> Result<i32> {
        let raw = self.require(key)?;
        raw.parse::<i32>().map_err(|e| SwatError::Configuration {
            path: self.path.clone(),
            key: key.to_string(),
            message: format!("expected an integer, found '{raw}' ({e})"),
        })
    }

    /// Whether rows carry calendar dates (`ICALEN` = "1")
    pub fn calendar_mode(&self) -> Result<bool> {
        Ok(self.require(cio_keys::CALENDAR_FLAG)? == CALENDAR_FLAG_ON)
    }

    pub(crate) fn invalid(&self, key: &str, message: impl Into<String>) -> SwatError {
        SwatError::Configuration {
            path: self.path.clone(),
            key: key.to_string(),
            message: message.into(),
        }
    }
}
