use serde::{Deserialize, Serialize};

use crate::core::{CartesianFrame, SeriesSample};
use crate::error::{ChartError, ChartResult};

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Deterministic bar geometry for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub value: f64,
    pub rect: BarRect,
}

/// Position of one series among the bar series sharing a category band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSlot {
    pub slot: usize,
    pub slot_count: usize,
    /// Share of the band covered by all slots together.
    pub width_ratio: f64,
}

impl BarSlot {
    #[must_use]
    pub fn single(width_ratio: f64) -> Self {
        Self {
            slot: 0,
            slot_count: 1,
            width_ratio,
        }
    }

    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.width_ratio.is_finite() || self.width_ratio <= 0.0 || self.width_ratio > 1.0 {
            return Err(ChartError::Configuration(
                "bar width ratio must be in (0, 1]".to_owned(),
            ));
        }
        if self.slot_count == 0 || self.slot >= self.slot_count {
            return Err(ChartError::Configuration(format!(
                "bar slot {} out of {} slots",
                self.slot, self.slot_count
            )));
        }
        Ok(self)
    }

    /// `(offset from band centre, thickness)` in pixels.
    #[must_use]
    pub fn placement(self, band_width: f64) -> (f64, f64) {
        let group = band_width * self.width_ratio;
        let thickness = group / self.slot_count as f64;
        (-group * 0.5 + thickness * self.slot as f64, thickness)
    }
}

/// Rectangle spanning `value_from..value_to` along the value axis and
/// `thickness` pixels across it starting at `category_px + offset`.
pub(crate) fn band_rect(
    frame: &CartesianFrame<'_>,
    category_px: f64,
    offset: f64,
    thickness: f64,
    value_from_px: f64,
    value_to_px: f64,
) -> BarRect {
    let low = value_from_px.min(value_to_px);
    let length = (value_to_px - value_from_px).abs();
    if frame.horizontal {
        BarRect {
            x: low,
            y: category_px + offset,
            width: length,
            height: thickness,
        }
    } else {
        BarRect {
            x: category_px + offset,
            y: low,
            width: thickness,
            height: length,
        }
    }
}

/// Projects samples into bars standing on the zero baseline.
///
/// Gaps produce no bar; the baseline is zero clamped into the value domain.
pub fn project_bars(
    samples: &[SeriesSample],
    frame: &CartesianFrame<'_>,
    slot: BarSlot,
) -> ChartResult<Vec<BarGeometry>> {
    let slot = slot.validate()?;
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let baseline_px = frame.baseline_px()?;
    let (offset, thickness) = slot.placement(frame.band_width(samples.len())?);

    let mut bars = Vec::with_capacity(samples.len());
    for sample in samples {
        let Some((category, value)) = sample.point() else {
            continue;
        };
        let category_px = frame.category.map(category)?;
        let value_px = frame.value.map(value)?;
        bars.push(BarGeometry {
            index: sample.index,
            value,
            rect: band_rect(frame, category_px, offset, thickness, baseline_px, value_px),
        });
    }
    Ok(bars)
}
