use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, NiceScale};
use crate::error::{ChartError, ChartResult};

/// Fewest categories that still enclose an area.
pub const MIN_POLAR_CATEGORIES: usize = 3;

/// Point at `angle` radians (clockwise from the positive x axis in screen space).
#[must_use]
pub fn polar_to_cartesian(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
}

/// Angle of spoke `index` out of `count`, starting straight up.
#[must_use]
pub fn spoke_angle(index: usize, count: usize) -> f64 {
    -FRAC_PI_2 + TAU * index as f64 / count.max(1) as f64
}

/// Centre and outer radius shared by every series of a polar group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarLayout {
    pub center: (f64, f64),
    pub radius: f64,
    pub category_count: usize,
    pub radial: NiceScale,
}

impl PolarLayout {
    fn radial_scale(&self) -> ChartResult<LinearScale> {
        LinearScale::new(self.radial.min, self.radial.max, 0.0, self.radius)
    }

    /// Polygon vertices for one ring of the web at `value`.
    pub fn ring(&self, value: f64) -> ChartResult<Vec<(f64, f64)>> {
        let radius = self.radial_scale()?.domain_to_pixel(value)?;
        Ok((0..self.category_count)
            .map(|index| polar_to_cartesian(self.center, radius, spoke_angle(index, self.category_count)))
            .collect())
    }

    /// Outer end point of every spoke.
    #[must_use]
    pub fn spokes(&self) -> Vec<(f64, f64)> {
        (0..self.category_count)
            .map(|index| {
                polar_to_cartesian(self.center, self.radius, spoke_angle(index, self.category_count))
            })
            .collect()
    }
}

/// Maps one series onto the web; gaps and values below the radial minimum
/// sit on the centre ring.
pub fn project_polar_polygon(
    values: &[Option<f64>],
    layout: &PolarLayout,
) -> ChartResult<Vec<(f64, f64)>> {
    if layout.category_count < MIN_POLAR_CATEGORIES {
        return Err(ChartError::InvalidData(format!(
            "polar layout needs at least {MIN_POLAR_CATEGORIES} categories"
        )));
    }
    let scale = layout.radial_scale()?;
    (0..layout.category_count)
        .map(|index| {
            let value = values
                .get(index)
                .copied()
                .flatten()
                .unwrap_or(layout.radial.min)
                .clamp(layout.radial.min, layout.radial.max);
            let radius = scale.domain_to_pixel(value)?;
            Ok(polar_to_cartesian(
                layout.center,
                radius,
                spoke_angle(index, layout.category_count),
            ))
        })
        .collect()
}
