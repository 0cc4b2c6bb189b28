//! Aggregation functions applied to one resample bin
//!
//! Missing values (and NaN) are skipped. An empty bin sums to zero; every
//! other function of an empty bin is missing. `std` and `sem` use one delta
//! degree of freedom and need at least two values.

use crate::models::Aggregation;

impl Aggregation {
    /// Aggregate the values of one bin
    pub fn apply(&self, values: &[Option<f64>]) -> Option<f64> {
        let present: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();

        match self {
            Aggregation::Sum => Some(present.iter().sum()),
            Aggregation::Mean => mean(&present),
            Aggregation::Std => sample_std(&present),
            Aggregation::Sem => {
                sample_std(&present).map(|std| std / (present.len() as f64).sqrt())
            }
            Aggregation::Max => present.iter().copied().reduce(f64::max),
            Aggregation::Min => present.iter().copied().reduce(f64::min),
            Aggregation::Median => median(present),
            Aggregation::First => present.first().copied(),
            Aggregation::Last => present.last().copied(),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
