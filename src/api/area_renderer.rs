use crate::core::{ChartType, Series, SeriesStyle, project_area_runs};
use crate::error::ChartResult;
use crate::render::{PathPrimitive, Primitive};

use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct AreaRenderer;

impl SeriesRenderer for AreaRenderer {
    fn render_series(
        &self,
        series: &Series,
        _slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let SeriesStyle::Area(options) = &series.style else {
            return Err(style_mismatch(series, ChartType::Area));
        };
        let (frame, samples) = ctx.cartesian_samples(series)?;
        let areas = project_area_runs(&samples, &frame)?;
        require_points(
            series,
            2,
            areas.iter().map(|area| area.line_points.len()).sum(),
        )?;

        let color = ctx.series_color(series);
        let fill = color.with_alpha(options.fill_opacity);
        let mut primitives = Vec::with_capacity(areas.len() * 2);
        for area in &areas {
            let polygon: Vec<(f64, f64)> = area
                .fill_polygon
                .iter()
                .map(|vertex| (vertex.x, vertex.y))
                .collect();
            primitives.push(PathPrimitive::polygon(&polygon).with_fill(Some(fill)).into());

            if options.stroke_width > 0.0 && area.line_points.len() > 1 {
                let outline: Vec<(f64, f64)> = area
                    .line_points
                    .iter()
                    .map(|vertex| (vertex.x, vertex.y))
                    .collect();
                primitives.push(
                    PathPrimitive::polyline(&outline)
                        .with_stroke(Some(color), options.stroke_width)
                        .into(),
                );
            }
        }
        Ok(primitives)
    }
}
