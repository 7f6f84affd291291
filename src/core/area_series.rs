use crate::core::line_series::project_line_runs;
use crate::core::{CartesianFrame, SeriesSample};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Vertex in pixel coordinates used by deterministic area geometry output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y: f64,
}

/// Deterministic geometry for one unbroken stretch of an area series.
///
/// `line_points` follows the mapped data points.
/// `fill_polygon` is an explicitly closed polygon against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub line_points: Vec<AreaVertex>,
    pub fill_polygon: Vec<AreaVertex>,
}

/// Projects samples into one filled polygon per run of non-gap samples.
///
/// The baseline is zero clamped into the value domain, measured along the
/// value axis so horizontal charts fill towards the left edge.
pub fn project_area_runs(
    samples: &[SeriesSample],
    frame: &CartesianFrame<'_>,
) -> ChartResult<Vec<AreaGeometry>> {
    let baseline_px = frame.baseline_px()?;
    let runs = project_line_runs(samples, frame)?;

    let to_baseline = |vertex: AreaVertex| {
        if frame.horizontal {
            AreaVertex {
                x: baseline_px,
                y: vertex.y,
            }
        } else {
            AreaVertex {
                x: vertex.x,
                y: baseline_px,
            }
        }
    };

    Ok(runs
        .into_iter()
        .map(|run| {
            let line_points: Vec<AreaVertex> = run
                .into_iter()
                .map(|vertex| AreaVertex {
                    x: vertex.x,
                    y: vertex.y,
                })
                .collect();
            let first = to_baseline(line_points[0]);
            let last = to_baseline(line_points[line_points.len() - 1]);

            let mut fill_polygon = Vec::with_capacity(line_points.len() + 3);
            fill_polygon.push(first);
            fill_polygon.extend(line_points.iter().copied());
            fill_polygon.push(last);
            // Repeat the first baseline vertex so consumers can render this
            // as a closed polygon without implicit closure rules.
            fill_polygon.push(first);

            AreaGeometry {
                line_points,
                fill_polygon,
            }
        })
        .collect())
}
