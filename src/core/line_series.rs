use crate::core::{CartesianFrame, SeriesSample};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Mapped line vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineVertex {
    pub x: f64,
    pub y: f64,
}

/// Cubic Bezier piece of a smoothed line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub from: LineVertex,
    pub control1: LineVertex,
    pub control2: LineVertex,
    pub to: LineVertex,
}

/// Projects samples into contiguous vertex runs.
///
/// A gap (missing category or value) closes the current run, so the output
/// holds one run per unbroken stretch of data.
pub fn project_line_runs(
    samples: &[SeriesSample],
    frame: &CartesianFrame<'_>,
) -> ChartResult<Vec<Vec<LineVertex>>> {
    let mut runs = Vec::new();
    let mut current: Vec<LineVertex> = Vec::new();
    for sample in samples {
        match sample.point() {
            Some((category, value)) => {
                let (x, y) = frame.point(category, value)?;
                current.push(LineVertex { x, y });
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    Ok(runs)
}

/// Smooths a run with Catmull-Rom derived control points.
///
/// `smoothing` scales the tangent at each vertex; `1/6` reproduces a uniform
/// Catmull-Rom spline and `0` degenerates to straight segments.
#[must_use]
pub fn spline_segments(run: &[LineVertex], smoothing: f64) -> Vec<CubicSegment> {
    if run.len() < 2 {
        return Vec::new();
    }

    let last = run.len() - 1;
    (0..last)
        .map(|index| {
            let previous = run[index.saturating_sub(1)];
            let from = run[index];
            let to = run[index + 1];
            let next = run[(index + 2).min(last)];
            CubicSegment {
                from,
                control1: LineVertex {
                    x: from.x + (to.x - previous.x) * smoothing,
                    y: from.y + (to.y - previous.y) * smoothing,
                },
                control2: LineVertex {
                    x: to.x - (next.x - from.x) * smoothing,
                    y: to.y - (next.y - from.y) * smoothing,
                },
                to,
            }
        })
        .collect()
}
