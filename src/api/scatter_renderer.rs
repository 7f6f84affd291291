use crate::core::{ChartType, Series, SeriesStyle, project_scatter_points};
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, Primitive};

use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterRenderer;

impl SeriesRenderer for ScatterRenderer {
    fn render_series(
        &self,
        series: &Series,
        _slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let SeriesStyle::Scatter(options) = &series.style else {
            return Err(style_mismatch(series, ChartType::Scatter));
        };
        let (frame, samples) = ctx.cartesian_samples(series)?;
        let points = project_scatter_points(&samples, &frame)?;
        require_points(series, 1, points.len())?;

        let fill = ctx.series_color(series);
        Ok(points
            .into_iter()
            .map(|point| {
                CirclePrimitive::filled(point.x, point.y, options.radius, fill)
                    .with_stroke(options.stroke, 1.0)
                    .into()
            })
            .collect())
    }
}
