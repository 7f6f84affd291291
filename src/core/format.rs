use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Separators and precision used when turning numbers into label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal_separator: String,
    pub thousands_separator: String,
    /// Fixed decimal count; `None` picks precision from magnitude.
    pub decimals: Option<usize>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_owned(),
            thousands_separator: ",".to_owned(),
            decimals: None,
        }
    }
}

impl NumberFormat {
    #[must_use]
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    #[must_use]
    pub fn with_separators(
        mut self,
        decimal_separator: impl Into<String>,
        thousands_separator: impl Into<String>,
    ) -> Self {
        self.decimal_separator = decimal_separator.into();
        self.thousands_separator = thousands_separator.into();
        self
    }
}

const ZERO_EPSILON: f64 = 1e-7;
const MAX_AUTO_DECIMALS: usize = 10;

/// Picks a decimal count from the value's magnitude.
#[must_use]
pub fn auto_decimals(value: f64) -> usize {
    let magnitude = value.abs();
    if magnitude >= 100.0 {
        0
    } else if magnitude >= 10.0 {
        1
    } else if magnitude >= 1.0 {
        2
    } else {
        let mut scaled = magnitude;
        for decimals in 1..=MAX_AUTO_DECIMALS {
            scaled *= 10.0;
            if scaled >= 1.0 {
                return decimals;
            }
        }
        MAX_AUTO_DECIMALS
    }
}

/// Formats a number with grouping and the configured decimal rule.
///
/// Exact zero and magnitudes below `1e-7` always render as `"0"`.
#[must_use]
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    if value.abs() < ZERO_EPSILON {
        return "0".to_owned();
    }

    let decimals = format.decimals.unwrap_or_else(|| auto_decimals(value));
    let fixed = format!("{:.decimals$}", value.abs());
    let (integer_part, fraction_part) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut text = String::with_capacity(fixed.len() + 4);
    let digits = integer_part.len();
    for (position, digit) in integer_part.chars().enumerate() {
        if position > 0 && (digits - position) % 3 == 0 {
            text.push_str(&format.thousands_separator);
        }
        text.push(digit);
    }
    if let Some(fraction) = fraction_part {
        text.push_str(&format.decimal_separator);
        text.push_str(fraction);
    }

    let is_rounded_zero = fixed.chars().all(|ch| ch == '0' || ch == '.');
    if value < 0.0 && !is_rounded_zero {
        text.insert(0, '-');
    }
    text
}

/// Rejects strftime patterns `chrono` cannot render.
pub fn validate_timestamp_pattern(pattern: &str) -> ChartResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::Configuration(format!(
            "invalid timestamp pattern `{pattern}`"
        )));
    }
    Ok(())
}

/// Formats unix seconds with a `chrono` strftime pattern in UTC.
///
/// Timestamps outside the representable range, and patterns that fail to
/// render, fall back to number text.
#[must_use]
pub fn format_timestamp(seconds: f64, pattern: &str) -> String {
    if !seconds.is_finite() {
        return "nan".to_owned();
    }
    let millis = (seconds * 1_000.0).round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return format_number(seconds, &NumberFormat::default());
    }
    let Some(time) = DateTime::<Utc>::from_timestamp_millis(millis as i64) else {
        return format_number(seconds, &NumberFormat::default());
    };
    let mut text = String::new();
    match write!(text, "{}", time.format(pattern)) {
        Ok(()) => text,
        Err(_) => format_number(seconds, &NumberFormat::default()),
    }
}
