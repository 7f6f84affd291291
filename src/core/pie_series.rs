use serde::{Deserialize, Serialize};

use crate::core::ChartArea;
use crate::core::polar_series::polar_to_cartesian;

/// Angular extent of one value inside a pie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Index of the sample the slice was built from.
    pub index: usize,
    pub value: f64,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }

    #[must_use]
    pub fn is_full_circle(self) -> bool {
        self.fraction >= 1.0 - 1e-12
    }
}

/// Splits a full turn between the positive values, clockwise from
/// `start_angle` (radians). Gaps, zero and negative values get no slice.
#[must_use]
pub fn layout_pie_slices(values: &[Option<f64>], start_angle: f64) -> Vec<PieSlice> {
    let total: f64 = values
        .iter()
        .flatten()
        .filter(|value| **value > 0.0)
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = start_angle;
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| value.filter(|value| *value > 0.0).map(|value| (index, value)))
        .map(|(index, value)| {
            let fraction = value / total;
            let start = angle;
            angle += fraction * std::f64::consts::TAU;
            PieSlice {
                index,
                value,
                fraction,
                start_angle: start,
                end_angle: angle,
            }
        })
        .collect()
}

/// Placement of one pie when several share the chart area side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieLayout {
    pub center: (f64, f64),
    pub radius: f64,
    pub inner_radius: f64,
}

impl PieLayout {
    #[must_use]
    pub fn for_slot(
        area: ChartArea,
        slot: usize,
        slot_count: usize,
        radius_ratio: f64,
        inner_radius_ratio: f64,
    ) -> Self {
        let slot_width = area.width / slot_count.max(1) as f64;
        let center = (
            area.x + slot_width * (slot as f64 + 0.5),
            area.y + area.height * 0.5,
        );
        let radius = slot_width.min(area.height) * 0.5 * radius_ratio.clamp(0.0, 1.0);
        Self {
            center,
            radius,
            inner_radius: radius * inner_radius_ratio.clamp(0.0, 0.99),
        }
    }

    #[must_use]
    pub fn point(self, radius: f64, angle: f64) -> (f64, f64) {
        polar_to_cartesian(self.center, radius, angle)
    }

    /// Anchor for a slice label, halfway through the ring.
    #[must_use]
    pub fn label_anchor(self, slice: PieSlice) -> (f64, f64) {
        let radius = if slice.is_full_circle() && self.inner_radius <= 0.0 {
            0.0
        } else {
            (self.radius + self.inner_radius) * 0.5
        };
        self.point(radius, slice.mid_angle())
    }
}
