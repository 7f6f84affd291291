use crate::core::{
    ChartType, LineOptions, LineVertex, Series, SeriesStyle, project_line_runs, spline_segments,
};
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, PathCommand, PathPrimitive, Primitive};

use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

/// Line and spline series. Each unbroken run of samples becomes one path.
#[derive(Debug, Clone, Copy)]
pub struct LineRenderer {
    smooth: bool,
}

impl LineRenderer {
    pub const STRAIGHT: Self = Self { smooth: false };
    pub const SMOOTH: Self = Self { smooth: true };

    fn expected_type(self) -> ChartType {
        if self.smooth {
            ChartType::Spline
        } else {
            ChartType::Line
        }
    }

    fn options<'s>(self, series: &'s Series) -> ChartResult<&'s LineOptions> {
        match (&series.style, self.smooth) {
            (SeriesStyle::Line(options), false) | (SeriesStyle::Spline(options), true) => {
                Ok(options)
            }
            _ => Err(style_mismatch(series, self.expected_type())),
        }
    }

    fn run_path(self, run: &[LineVertex], smoothing: f64) -> Option<PathPrimitive> {
        let first = run.first()?;
        if run.len() < 2 {
            return None;
        }
        if !self.smooth {
            let points: Vec<(f64, f64)> = run.iter().map(|vertex| (vertex.x, vertex.y)).collect();
            return Some(PathPrimitive::polyline(&points));
        }

        let mut commands = vec![PathCommand::MoveTo {
            x: first.x,
            y: first.y,
        }];
        commands.extend(
            spline_segments(run, smoothing)
                .into_iter()
                .map(|segment| PathCommand::CubicTo {
                    c1x: segment.control1.x,
                    c1y: segment.control1.y,
                    c2x: segment.control2.x,
                    c2y: segment.control2.y,
                    x: segment.to.x,
                    y: segment.to.y,
                }),
        );
        Some(PathPrimitive::new(commands))
    }
}

impl SeriesRenderer for LineRenderer {
    fn render_series(
        &self,
        series: &Series,
        _slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let options = self.options(series)?;
        let (frame, samples) = ctx.cartesian_samples(series)?;
        let runs = project_line_runs(&samples, &frame)?;
        require_points(series, 2, runs.iter().map(Vec::len).sum())?;

        let color = ctx.series_color(series);
        let mut primitives = Vec::new();
        for run in &runs {
            if let Some(path) = self.run_path(run, options.smoothing) {
                primitives.push(path.with_stroke(Some(color), options.stroke_width).into());
            }
        }
        if options.show_markers {
            primitives.extend(runs.iter().flatten().map(|vertex| {
                CirclePrimitive::filled(vertex.x, vertex.y, options.marker_radius, color)
                    .into()
            }));
        }
        Ok(primitives)
    }
}
