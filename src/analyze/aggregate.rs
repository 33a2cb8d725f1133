use serde::Serialize;
use thiserror::Error;

/// Summary statistics over one set of sample values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Aggregating zero values is an error, not a row of zeroes: a fabricated
/// `average: 0.0` would be indistinguishable from real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot aggregate an empty value set")]
pub struct EmptyAggregation;

/// Computes count, sum, min, max and average in one pass.
///
/// IEEE 754 semantics apply throughout. `NaN` inputs poison sum and average;
/// min and max follow `f64::min`/`f64::max`, which prefer the non-NaN
/// operand. Infinities flow through arithmetic untouched.
pub fn aggregate(values: &[f64]) -> Result<Aggregate, EmptyAggregation> {
    let first = match values.first() {
        Some(&first) => first,
        None => return Err(EmptyAggregation),
    };
    let mut sum = 0.0;
    let mut min = first;
    let mut max = first;
    for &value in values {
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    Ok(Aggregate {
        count: values.len(),
        sum,
        min,
        max,
        average: sum / values.len() as f64,
    })
}
