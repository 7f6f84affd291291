//! Aggregation over heterogeneous sample streams.
//!
//! All scans skip nulls, empty strings and anything that fails numeric
//! conversion. `find_min`/`find_max`/`data_range` report "no data" as `None`;
//! `average` of an empty scan is `0.0`. The two conventions differ on purpose:
//! callers that size axes must notice missing data, while summary labels
//! treat it as zero.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Value;

/// Inclusive numeric extent of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl DataRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn include(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

fn numeric_values<'a, I>(values: I) -> impl Iterator<Item = f64>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().filter_map(|value| {
        let number = value.as_number();
        if number.is_none() && !value.is_null() {
            trace!(?value, "skipping non-numeric sample");
        }
        number
    })
}

#[must_use]
pub fn find_min<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Value>,
{
    numeric_values(values).reduce(f64::min)
}

#[must_use]
pub fn find_max<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Value>,
{
    numeric_values(values).reduce(f64::max)
}

/// Single-pass min/max scan.
#[must_use]
pub fn data_range<'a, I>(values: I) -> Option<DataRange>
where
    I: IntoIterator<Item = &'a Value>,
{
    numeric_values(values).fold(None, |range: Option<DataRange>, value| {
        Some(match range {
            Some(range) => range.include(value),
            None => DataRange::new(value, value),
        })
    })
}

#[must_use]
pub fn sum<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a Value>,
{
    numeric_values(values).sum()
}

#[must_use]
pub fn average<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a Value>,
{
    let (total, count) = numeric_values(values).fold((0.0, 0_usize), |(total, count), value| {
        (total + value, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
