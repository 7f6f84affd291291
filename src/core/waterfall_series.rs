use serde::{Deserialize, Serialize};

use crate::core::bar_series::{BarRect, BarSlot, band_rect};
use crate::core::series::waterfall_steps;
use crate::core::{CartesianFrame, SeriesSample};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterfallStepKind {
    Increase,
    Decrease,
    Total,
}

/// One floating bar between two running totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallBar {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub kind: WaterfallStepKind,
    pub rect: BarRect,
}

/// Horizontal or vertical connector between neighbouring bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallConnector {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaterfallGeometry {
    pub bars: Vec<WaterfallBar>,
    pub connectors: Vec<WaterfallConnector>,
}

/// Projects cumulative deltas into floating bars.
///
/// With `show_total` a final bar from zero to the grand total is placed in
/// the band after the last sample. Gaps contribute nothing and draw no bar.
pub fn project_waterfall(
    samples: &[SeriesSample],
    frame: &CartesianFrame<'_>,
    slot: BarSlot,
    show_total: bool,
) -> ChartResult<WaterfallGeometry> {
    if samples.is_empty() {
        return Ok(WaterfallGeometry::default());
    }

    let deltas: Vec<Option<f64>> = samples
        .iter()
        .map(|sample| sample.category.and(sample.value))
        .collect();
    let steps = waterfall_steps(&deltas);
    let slot = slot.validate()?;
    let band_count = samples.len() + usize::from(show_total);
    let (offset, thickness) = slot.placement(frame.band_width(band_count)?);

    let mut geometry = WaterfallGeometry::default();
    for (sample, (start, end)) in samples.iter().zip(steps.iter().copied()) {
        let (Some(category), Some(_)) = (sample.category, sample.value) else {
            continue;
        };
        let kind = if end >= start {
            WaterfallStepKind::Increase
        } else {
            WaterfallStepKind::Decrease
        };
        geometry.bars.push(WaterfallBar {
            index: sample.index,
            start,
            end,
            kind,
            rect: band_rect(
                frame,
                frame.category.map(category)?,
                offset,
                thickness,
                frame.value.map(start)?,
                frame.value.map(end)?,
            ),
        });
    }

    if show_total {
        let total = steps.last().map_or(0.0, |(_, end)| *end);
        let category = samples
            .last()
            .and_then(|sample| sample.category)
            .map_or(samples.len() as f64, |last| last + 1.0);
        geometry.bars.push(WaterfallBar {
            index: samples.len(),
            start: 0.0,
            end: total,
            kind: WaterfallStepKind::Total,
            rect: band_rect(
                frame,
                frame.category.map(category)?,
                offset,
                thickness,
                frame.value.map(0.0)?,
                frame.value.map(total)?,
            ),
        });
    }

    for pair in geometry.bars.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let level = frame.value.map(current.end)?;
        let connector = if frame.horizontal {
            WaterfallConnector {
                x1: level,
                y1: current.rect.y,
                x2: level,
                y2: next.rect.y + next.rect.height,
            }
        } else {
            WaterfallConnector {
                x1: current.rect.x + current.rect.width,
                y1: level,
                x2: next.rect.x,
                y2: level,
            }
        };
        geometry.connectors.push(connector);
    }

    Ok(geometry)
}
