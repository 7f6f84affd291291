use crate::core::{
    BarSlot, ChartType, Color, Series, SeriesStyle, WaterfallStepKind, project_waterfall,
};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, LineStrokeStyle, Primitive, RectPrimitive};

use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

const CONNECTOR_COLOR: Color = Color::rgb(0x99, 0x99, 0x99);

#[derive(Debug, Clone, Copy, Default)]
pub struct WaterfallRenderer;

impl SeriesRenderer for WaterfallRenderer {
    fn render_series(
        &self,
        series: &Series,
        slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let SeriesStyle::Waterfall(options) = &series.style else {
            return Err(style_mismatch(series, ChartType::Waterfall));
        };
        let (frame, samples) = ctx.cartesian_samples(series)?;
        let bar_slot = BarSlot {
            slot: slot.index,
            slot_count: slot.count,
            width_ratio: options.bar_width_ratio,
        };
        let geometry = project_waterfall(&samples, &frame, bar_slot, options.show_total)?;
        let steps = geometry
            .bars
            .iter()
            .filter(|bar| bar.kind != WaterfallStepKind::Total)
            .count();
        require_points(series, 1, steps)?;

        let mut primitives: Vec<Primitive> = geometry
            .bars
            .iter()
            .map(|bar| {
                let fill = match bar.kind {
                    WaterfallStepKind::Increase => options.positive_color,
                    WaterfallStepKind::Decrease => options.negative_color,
                    WaterfallStepKind::Total => options.total_color,
                };
                RectPrimitive::filled(bar.rect.x, bar.rect.y, bar.rect.width, bar.rect.height, fill)
                    .into()
            })
            .collect();

        if options.show_connectors {
            primitives.extend(geometry.connectors.iter().map(|connector| {
                LinePrimitive::new(
                    connector.x1,
                    connector.y1,
                    connector.x2,
                    connector.y2,
                    1.0,
                    CONNECTOR_COLOR,
                )
                .with_stroke_style(LineStrokeStyle::Dashed)
                .into()
            }));
        }
        Ok(primitives)
    }
}
