use crate::core::{BarSlot, ChartType, Series, SeriesStyle, project_bars};
use crate::error::ChartResult;
use crate::render::{Primitive, RectPrimitive};

use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

/// Grouped bars: bar series of one group share each category band.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarRenderer;

impl SeriesRenderer for BarRenderer {
    fn render_series(
        &self,
        series: &Series,
        slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let SeriesStyle::Bar(options) = &series.style else {
            return Err(style_mismatch(series, ChartType::Bar));
        };
        let (frame, samples) = ctx.cartesian_samples(series)?;
        let bar_slot = BarSlot {
            slot: slot.index,
            slot_count: slot.count,
            width_ratio: options.bar_width_ratio,
        };
        let bars = project_bars(&samples, &frame, bar_slot)?;
        require_points(series, 1, bars.len())?;

        let fill = ctx.series_color(series);
        Ok(bars
            .into_iter()
            .map(|bar| {
                RectPrimitive::filled(bar.rect.x, bar.rect.y, bar.rect.width, bar.rect.height, fill)
                    .with_stroke(options.stroke, 1.0)
                    .with_corner_radius(options.corner_radius)
                    .into()
            })
            .collect())
    }
}
