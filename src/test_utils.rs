//! Fixtures shared by unit and integration tests
//!
//! Builders for `file.cio` lines and fixed-width `output.rch` rows in both
//! column layouts.

use std::fs;
use std::path::Path;

/// Lines of a SWAT2012 `file.cio` with the given settings substituted
pub(crate) fn cio_lines(settings: &[(&str, &str)]) -> Vec<String> {
    let value = |key: &str, default: &str| -> String {
        settings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| default.to_string())
    };
    let setting = |key: &str, default: &str, description: &str| -> String {
        format!("{:>16}    | {:<10}: {}", value(key, default), key, description)
    };

    let mut lines = vec![
        "Master Watershed File: file.cio".to_string(),
        "Project Description:".to_string(),
        "General Input/Output section (file.cio):".to_string(),
        "6/2/2020 12:00:00 AM ARCGIS-SWAT interface AV".to_string(),
        String::new(),
        "General Information/Watershed Configuration:".to_string(),
        "fig.fig".to_string(),
        setting("NBYR", "12", "Number of years simulated"),
        setting("IYR", "1990", "Beginning year of simulation"),
        setting("IDAF", "1", "Beginning julian day of simulation"),
        setting("IDAL", "365", "Ending julian day of simulation"),
        "Climate:".to_string(),
    ];
    let climate = [
        "IGEN", "PCPSIM", "IDT", "IDIST", "REXP", "NRGAGE", "NRTOT", "NRGFIL", "TMPSIM",
        "NTGAGE", "NTTOT", "NTGFIL", "SLRSIM", "NSTOT", "RHSIM", "NHTOT", "WNDSIM", "NWTOT",
        "FCSTYR", "FCSTDAY", "FCSTCYCLES",
    ];
    lines.extend(climate.iter().map(|k| setting(k, "0", "climate setting")));
    lines.push("Precipitation Files:".to_string());
    lines.push(String::new());
    lines.push("pcp1.pcp".to_string());
    lines.push(String::new());
    lines.push(String::new());
    lines.push("Temperature Files:".to_string());
    lines.push(String::new());
    lines.push("tmp1.tmp".to_string());
    for key in ["SLRFILE", "RHFILE", "WNDFILE", "FCSTFILE"] {
        lines.push(setting(key, "", "climate file name"));
    }
    lines.push("Watershed Modeling Options:".to_string());
    lines.push(setting("BSNFILE", "basins.bsn", "basin input file"));
    lines.push("Database Files:".to_string());
    for key in ["PLANTDB", "TILLDB", "PESTDB", "FERTDB", "URBANDB"] {
        lines.push(setting(key, "db.dat", "database file name"));
    }
    lines.push("Special Projects:".to_string());
    for key in ["ISPROJ", "ICLB", "CALFILE"] {
        lines.push(setting(key, "0", "special project setting"));
    }
    lines.push("Output Information:".to_string());
    lines.push(setting("IPRINT", "1", "print code (month, day, year)"));
    lines.push(setting("NYSKIP", "2", "number of years to skip output printing"));
    lines.push(setting("ILOG", "0", "streamflow print code"));
    lines.push(setting("IPRP", "0", "print code for output.pst file"));
    lines.push("Reach output variables:".to_string());
    for _ in 63..=72 {
        lines.push("   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0".to_string());
    }
    for key in ["IA_B", "IHUMUS", "ITEMP", "ISNOW"] {
        lines.push(setting(key, "0", "output option"));
    }
    lines.push("   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0   0".to_string());
    for key in ["IMGT", "IWTR", "ICALEN"] {
        lines.push(setting(key, "0", "output option"));
    }
    lines
}


/// Preamble lines written before the column header of an output report
pub(crate) fn preamble() -> Vec<String> {
    vec![
        String::new(),
        "  SWAT Sep 7    VER 2012/Rev 664".to_string(),
        "  General Input/Output section (file.cio):".to_string(),
        "  6/2/2020 12:00:00 AM ARCGIS-SWAT interface AV".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "REACH INFORMATION".to_string(),
    ]
}

/// Compact-layout row: TYPE RCH GIS MON AREAkm2 then variables
pub(crate) fn compact_line(unit: u32, step: f64, values: &[f64]) -> String {
    let mut line = format!(
        "{:<6}{:>5}{:>9}{:>6}{:>12.4}",
        "REACH",
        unit,
        unit,
        format_step(step),
        125.5
    );
    for value in values {
        line.push_str(&format!("{value:>12.4}"));
    }
    line
}

/// Calendar-layout row: TYPE RCH GIS MO DA YR AREAkm2 then variables
pub(crate) fn calendar_line(unit: u32, year: i32, month: u32, day: u32, values: &[f64]) -> String {
    let mut line = format!(
        "{:<6}{:>5}{:>10}{:>3}{:>3}{:>5}{:>13.4}",
        "REACH", unit, unit, month, day, year, 125.5
    );
    for value in values {
        line.push_str(&format!("{value:>12.4}"));
    }
    line
}

fn format_step(step: f64) -> String {
    if step.fract() == 0.0 {
        format!("{step:.0}")
    } else {
        format!("{step:.1}")
    }
}

/// Write an output report with the standard preamble
pub(crate) fn write_report(path: &Path, rows: &[String]) {
    let mut lines = preamble();
    lines.extend(rows.iter().cloned());
    fs::write(path, lines.join("\n") + "\n").unwrap();
}

/// Write a run directory holding `file.cio` and `output.rch`
pub(crate) fn write_run(dir: &Path, settings: &[(&str, &str)], rows: &[String]) {
    fs::write(dir.join("file.cio"), cio_lines(settings).join("\n") + "\n").unwrap();
    write_report(&dir.join("output.rch"), rows);
}
