use crate::core::{CartesianFrame, SeriesSample};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Maps every complete sample to a pixel point; gaps are dropped.
pub fn project_scatter_points(
    samples: &[SeriesSample],
    frame: &CartesianFrame<'_>,
) -> ChartResult<Vec<ScatterPoint>> {
    samples
        .iter()
        .filter_map(|sample| sample.point().map(|point| (sample.index, point)))
        .map(|(index, (category, value))| {
            let (x, y) = frame.point(category, value)?;
            Ok(ScatterPoint { index, x, y })
        })
        .collect()
}
