use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::format::{NumberFormat, format_number};

/// One raw sample as supplied by the caller.
///
/// Collections are heterogeneous: numeric series may contain gaps (`Null`),
/// numeric strings, or booleans for state timelines. Every consumer decides
/// through [`Value::as_number`] or [`Value::as_bool`] how to read a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Reads the sample as a finite number.
    ///
    /// Nulls, booleans, empty or non-numeric strings and non-finite numbers
    /// are not numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
            }
            _ => None,
        }
    }

    /// Reads the sample as a state flag.
    ///
    /// Native booleans pass through, numbers are `true` when non-zero and the
    /// strings `true`, `1`, `yes`, `y`, `on` (any case) are `true`. Everything
    /// else is `false`.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "y" | "on"
            ),
            Self::Null => false,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Display text used for category and legend labels.
    #[must_use]
    pub fn label(&self, format: &NumberFormat) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(flag) => flag.to_string(),
            // Whole numbers skip the automatic decimals.
            Self::Number(value) if format.decimals.is_none() && value.fract() == 0.0 => {
                format_number(*value, &format.clone().with_decimals(0))
            }
            Self::Number(value) => format_number(*value, format),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for Value {
    /// Decimals outside the `f64` range become gaps.
    fn from(value: Decimal) -> Self {
        value.to_f64().map_or(Self::Null, Self::Number)
    }
}

impl From<DateTime<Utc>> for Value {
    /// Timestamps are stored as unix seconds with millisecond precision.
    fn from(value: DateTime<Utc>) -> Self {
        Self::Number(value.timestamp_millis() as f64 / 1000.0)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered sample sequence addressed by name inside a [`crate::core::DataSet`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCollection {
    values: Vec<Value>,
}

impl ValueCollection {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn from_iter_values<T, I>(values: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl<T: Into<Value>> FromIterator<T> for ValueCollection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_values(iter)
    }
}

impl<T: Into<Value>> From<Vec<T>> for ValueCollection {
    fn from(values: Vec<T>) -> Self {
        Self::from_iter_values(values)
    }
}

impl<'a> IntoIterator for &'a ValueCollection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
