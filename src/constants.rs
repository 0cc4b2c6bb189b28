//! Application constants for the SWAT output processor
//!
//! File names, run-configuration keys, fixed line indices and the column
//! catalogue of the reach (`output.rch`) report.

// =============================================================================
// Run Directory Layout
// =============================================================================

/// Master watershed (run configuration) file inside `TxtInOut`
pub const CIO_FILE_NAME: &str = "file.cio";

/// Reach output report
pub const REACH_OUTPUT_FILE_NAME: &str = "output.rch";

/// Subbasin output report; shares the `.sub` extension with subbasin inputs
pub const SUBBASIN_OUTPUT_FILE_NAME: &str = "output.sub";

/// Extension of per-subbasin input files
pub const SUBBASIN_FILE_EXTENSION: &str = "sub";

// =============================================================================
// Run Configuration (file.cio)
// =============================================================================

/// Zero-based line indices of `file.cio` that hold headers, section titles
/// or file lists rather than `value | KEY : description` settings.
pub const CIO_SKIP_LINES: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, // title block
    11, // climate section
    33, 34, 35, 36, 37, 38, 39, 40, // precipitation and temperature file lists
    45, // watershed modelling options
    47, // database files
    53, // special projects
    57, // output information
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, // printed variable lists
    77, // HRU variable list
];

/// Separator between value and key/description on a setting line
pub const CIO_VALUE_SEPARATOR: char = '|';

/// Separator between key and description
pub const CIO_KEY_TERMINATOR: char = ':';

/// Setting keys used to reconstruct the reporting calendar
pub mod cio_keys {
    /// Calendar-date printing flag ("1" = calendar rows)
    pub const CALENDAR_FLAG: &str = "ICALEN";
    /// Beginning year of simulation
    pub const START_YEAR: &str = "IYR";
    /// Number of years simulated
    pub const SIMULATED_YEARS: &str = "NBYR";
    /// Warm-up years excluded from printed output
    pub const WARMUP_YEARS: &str = "NYSKIP";
    /// Beginning julian day of simulation
    pub const FIRST_DAY: &str = "IDAF";
    /// Ending julian day of simulation
    pub const LAST_DAY: &str = "IDAL";
    /// Print code (0 = monthly, 1 = daily, 2 = annual)
    pub const PRINT_FREQUENCY: &str = "IPRINT";
}

/// Value of the calendar flag that selects the calendar layout
pub const CALENDAR_FLAG_ON: &str = "1";

// =============================================================================
// Output Report Layout
// =============================================================================

/// Header lines preceding the first record of an output report
pub const OUTPUT_PREAMBLE_LINES: usize = 9;

/// Width of every trailing variable column
pub const VARIABLE_COLUMN_WIDTH: usize = 12;

/// Step indices above this value mark annual summary rows in compact reports
pub const SUMMARY_STEP_LIMIT: f64 = 366.0;

/// Calendar layout: TYPE RCH GIS MO DA YR AREAkm2
pub const CALENDAR_LEADING_COLUMNS: &[&str] = &["TYPE", "RCH", "GIS", "MO", "DA", "YR", "AREAkm2"];
pub const CALENDAR_LEADING_WIDTHS: &[usize] = &[6, 5, 10, 3, 3, 5, 13];

/// Compact layout: TYPE RCH GIS MON AREAkm2
pub const COMPACT_LEADING_COLUMNS: &[&str] = &["TYPE", "RCH", "GIS", "MON", "AREAkm2"];
pub const COMPACT_LEADING_WIDTHS: &[usize] = &[6, 5, 9, 6, 12];

/// Name of the reporting-unit column in exported frames
pub const UNIT_COLUMN: &str = "RCH";

/// Name of the timestamp column in exported frames
pub const TIME_COLUMN: &str = "time";

/// Reach report variables in column order as `(name, unit)`; the printed
/// column label is the concatenation of both.
pub const REACH_VARIABLES: &[(&str, &str)] = &[
    ("FLOW_IN", "cms"),
    ("FLOW_OUT", "cms"),
    ("EVAP", "cms"),
    ("TLOSS", "cms"),
    ("SED_IN", "tons"),
    ("SED_OUT", "tons"),
    ("SEDCONC", "mg/kg"),
    ("ORGN_IN", "kg"),
    ("ORGN_OUT", "kg"),
    ("ORGP_IN", "kg"),
    ("ORGP_OUT", "kg"),
    ("NO3_IN", "kg"),
    ("NO3_OUT", "kg"),
    ("NH4_IN", "kg"),
    ("NH4_OUT", "kg"),
    ("NO2_IN", "kg"),
    ("NO2_OUT", "kg"),
    ("MINP_IN", "kg"),
    ("MINP_OUT", "kg"),
    ("CHLA_IN", "kg"),
    ("CHLA_OUT", "kg"),
    ("CBOD_IN", "kg"),
    ("CBOD_OUT", "kg"),
    ("DISOX_IN", "kg"),
    ("DISOX_OUT", "kg"),
    ("SOLPST_IN", "mg"),
    ("SOLPST_OUT", "mg"),
    ("SORPST_IN", "mg"),
    ("SORPST_OUT", "mg"),
    ("REACTPST", "mg"),
    ("VOLPST", "mg"),
    ("SETTLPST", "mg"),
    ("RESUSP_PST", "mg"),
    ("DIFFUSEPST", "mg"),
    ("REACBEDPST", "mg"),
    ("BURYPST", "mg"),
    ("BED_PST", "mg"),
    ("BACTP_OUT", "ct"),
    ("BACTLP_OUT", "ct"),
    ("CMETAL#1", "kg"),
    ("CMETAL#2", "kg"),
    ("CMETAL#3", "kg"),
    ("TOT N", "kg"),
    ("TOT P", "kg"),
    ("NO3Conc", "Mg/l"),
    ("WTMP", "degc"),
];

/// Column labels of the reach report variables (`FLOW_OUTcms`, ...)
pub fn reach_variable_labels() -> Vec<String> {
    REACH_VARIABLES
        .iter()
        .map(|(name, unit)| format!("{name}{unit}"))
        .collect()
}

/// Base name of a reach variable given either its label or its base name
pub fn reach_variable_base_name(label: &str) -> Option<&'static str> {
    REACH_VARIABLES.iter().find_map(|(name, unit)| {
        let matches_label = label
            .strip_prefix(name)
            .is_some_and(|suffix| suffix == *unit);
        (matches_label || label == *name).then_some(*name)
    })
}

/// Flow variables expressed in cubic metres per second
pub const FLOW_VARIABLES: &[&str] = &["FLOW_IN", "FLOW_OUT"];
