//! Flow unit conversion for filtered tables
//!
//! Reach flows are reported in m³/s. A [`FlowConversion`] rescales the
//! `FLOW_IN`/`FLOW_OUT` columns to another volume per time unit; every other
//! column is left untouched.

use crate::constants::{FLOW_VARIABLES, reach_variable_base_name};
use crate::error::{Result, SwatError};
use crate::models::{FilteredTable, OutputRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_MONTH: f64 = 30.4375;
const DAYS_PER_YEAR: f64 = 365.25;

/// Volume unit of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    CubicMetre,
    CubicFoot,
    AcreFoot,
}

impl VolumeUnit {
    /// Amount of this unit in one cubic metre
    pub fn per_cubic_metre(&self) -> f64 {
        match self {
            VolumeUnit::CubicMetre => 1.0,
            VolumeUnit::CubicFoot => 35.3147,
            VolumeUnit::AcreFoot => 0.000810714,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::CubicMetre => "m3",
            VolumeUnit::CubicFoot => "ft3",
            VolumeUnit::AcreFoot => "acre-ft",
        }
    }
}

impl FromStr for VolumeUnit {
    type Err = SwatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m3" | "cm" | "cubic_metre" | "cubic_meter" => Ok(VolumeUnit::CubicMetre),
            "ft3" | "cf" | "cubic_foot" | "cubic_feet" => Ok(VolumeUnit::CubicFoot),
            "acre-ft" | "af" | "acre_foot" | "acre_feet" => Ok(VolumeUnit::AcreFoot),
            other => Err(SwatError::spec(format!("unknown volume unit '{other}'"))),
        }
    }
}

/// Time unit of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Length in seconds; months and years are mean lengths
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Day => SECONDS_PER_DAY,
            TimeUnit::Month => SECONDS_PER_DAY * DAYS_PER_MONTH,
            TimeUnit::Year => SECONDS_PER_DAY * DAYS_PER_YEAR,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Day => "d",
            TimeUnit::Month => "month",
            TimeUnit::Year => "yr",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = SwatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "second" => Ok(TimeUnit::Second),
            "d" | "day" => Ok(TimeUnit::Day),
            "m" | "mon" | "month" => Ok(TimeUnit::Month),
            "y" | "yr" | "year" => Ok(TimeUnit::Year),
            other => Err(SwatError::spec(format!("unknown time unit '{other}'"))),
        }
    }
}

/// Target unit for reach flows, e.g. acre-feet per month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowConversion {
    pub volume: VolumeUnit,
    pub time: TimeUnit,
}

impl Default for FlowConversion {
    fn default() -> Self {
        Self {
            volume: VolumeUnit::CubicMetre,
            time: TimeUnit::Second,
        }
    }
}

impl fmt::Display for FlowConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.volume.symbol(), self.time.symbol())
    }
}

impl FlowConversion {
    pub fn new(volume: VolumeUnit, time: TimeUnit) -> Self {
        Self { volume, time }
    }

    /// Multiplier from m³/s to this unit
    pub fn factor(&self) -> f64 {
        self.volume.per_cubic_metre() * self.time.seconds()
    }

    /// Copy of `table` with its flow columns rescaled
    pub fn apply(&self, table: &FilteredTable) -> FilteredTable {
        let factor = self.factor();
        let flow_columns: Vec<bool> = table
            .variables
            .iter()
            .map(|variable| {
                reach_variable_base_name(variable)
                    .is_some_and(|name| FLOW_VARIABLES.contains(&name))
            })
            .collect();

        let records = table
            .records
            .iter()
            .map(|record| OutputRecord {
                unit: record.unit,
                date: record.date,
                values: record
                    .values
                    .iter()
                    .zip(&flow_columns)
                    .map(|(value, &is_flow)| if is_flow { value.map(|v| v * factor) } else { *value })
                    .collect(),
            })
            .collect();

        FilteredTable {
            variables: table.variables.clone(),
            frequency: table.frequency,
            records,
        }
    }
}
