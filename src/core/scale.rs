use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Human-friendly axis domain snapped to 1/2/5 x 10^n steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NiceScale {
    pub min: f64,
    pub max: f64,
    pub tick_interval: f64,
    pub tick_count: usize,
}

impl NiceScale {
    /// Tick values from `min` to `max`, one per interval.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        (0..self.tick_count)
            .map(|step| snap_to_interval(self.min + step as f64 * self.tick_interval, self.tick_interval))
            .collect()
    }
}

// Relative slack absorbing float noise in `span / interval` quotients.
const QUOTIENT_EPSILON: f64 = 1e-9;

/// Rounds the mantissa of a raw tick spacing to 1, 2, 5 or 10.
#[must_use]
pub fn nice_interval(raw_interval: f64) -> f64 {
    let exponent = raw_interval.log10().floor();
    let magnitude = 10_f64.powf(exponent);
    let mantissa = raw_interval / magnitude;
    let nice = if mantissa < 1.5 {
        1.0
    } else if mantissa < 3.0 {
        2.0
    } else if mantissa < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Computes a nice `(min, max, interval, count)` tuple covering `[min, max]`.
///
/// Degenerate ranges widen by one unit on each side. With `include_zero` a
/// range entirely above (below) zero is extended down (up) to zero.
pub fn compute_nice_scale(
    min: f64,
    max: f64,
    desired_tick_count: usize,
    include_zero: bool,
) -> ChartResult<NiceScale> {
    if desired_tick_count <= 1 {
        return Err(ChartError::Configuration(format!(
            "tick count must be >= 2, got {desired_tick_count}"
        )));
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::Configuration(
            "scale bounds must be finite".to_owned(),
        ));
    }

    let (mut low, mut high) = if min <= max { (min, max) } else { (max, min) };
    if low == high {
        low -= 1.0;
        high += 1.0;
    }
    if include_zero {
        if low > 0.0 {
            low = 0.0;
        } else if high < 0.0 {
            high = 0.0;
        }
    }

    let raw_interval = (high - low) / (desired_tick_count - 1) as f64;
    let tick_interval = nice_interval(raw_interval);
    let nice_min = (low / tick_interval + QUOTIENT_EPSILON).floor() * tick_interval;
    let nice_max = (high / tick_interval - QUOTIENT_EPSILON).ceil() * tick_interval;
    let mut nice_min = snap_to_interval(nice_min, tick_interval);
    let mut nice_max = snap_to_interval(nice_max, tick_interval);
    // Bounds absorbed by the epsilon or the snap must still contain the data.
    if nice_min > low {
        nice_min = snap_to_interval(nice_min - tick_interval, tick_interval);
    }
    if nice_max < high {
        nice_max = snap_to_interval(nice_max + tick_interval, tick_interval);
    }
    // Intervals below the ulp of the bounds cannot step; clamp instead.
    let nice_min = nice_min.min(low);
    let nice_max = nice_max.max(high);
    let tick_count = ((nice_max - nice_min) / tick_interval - QUOTIENT_EPSILON).ceil() as usize + 1;

    Ok(NiceScale {
        min: nice_min,
        max: nice_max,
        tick_interval,
        tick_count,
    })
}

/// Removes float residue from values that should sit on an interval multiple.
#[must_use]
pub fn snap_to_interval(value: f64, interval: f64) -> f64 {
    if !interval.is_finite() || interval <= 0.0 {
        return value;
    }
    let decimals = (-interval.log10().floor()).clamp(0.0, 15.0) as i32 + 1;
    let factor = 10_f64.powi(decimals);
    let snapped = (value * factor).round() / factor;
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Linear interpolation from a data domain onto a pixel range.
///
/// Fails on a zero-width or non-finite domain instead of clamping.
pub fn map_domain_to_range(
    value: f64,
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
) -> ChartResult<f64> {
    LinearScale::new(domain_min, domain_max, range_start, range_end)?.domain_to_pixel(value)
}

/// Domain-to-pixel mapping; inverted ranges (`start > end`) flip direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Pixels per domain unit (always positive).
    #[must_use]
    pub fn unit_length(self) -> f64 {
        ((self.range_end - self.range_start) / (self.domain_end - self.domain_start)).abs()
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale range must be non-zero to invert".to_owned(),
            ));
        }

        let normalized = (pixel - self.range_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
