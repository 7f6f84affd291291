use crate::core::{
    ChartType, Color, NumberFormat, PieLayout, PieOptions, PieSlice, Series, SeriesStyle,
    format_number, layout_pie_slices,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, FontStyle, PathCommand, PathPrimitive, Primitive, TextHAlign, TextPrimitive,
    TextVAlign,
};

use super::ChartConfig;
use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

/// Slices narrower than this share of the pie get no percentage label.
const MIN_LABEL_FRACTION: f64 = 0.04;

/// One pie (or donut) per series, laid out side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieRenderer;

/// Fill of the slice built from sample `index`.
pub(super) fn pie_slice_color(options: &PieOptions, config: &ChartConfig, index: usize) -> Color {
    if options.colors.is_empty() {
        config.palette_color(index)
    } else {
        options.colors[index % options.colors.len()]
    }
}

/// Slices of a pie series, clockwise from its configured start angle.
pub(super) fn pie_slices(
    series: &Series,
    options: &PieOptions,
    ctx: &RenderContext<'_>,
) -> ChartResult<Vec<PieSlice>> {
    let values = ctx.paired_values(series)?;
    Ok(layout_pie_slices(&values, options.start_angle_deg.to_radians()))
}

fn slice_path(layout: PieLayout, slice: PieSlice) -> PathPrimitive {
    let outer = layout.radius;
    let inner = layout.inner_radius;
    let large_arc = slice.end_angle - slice.start_angle > std::f64::consts::PI;
    let (outer_start_x, outer_start_y) = layout.point(outer, slice.start_angle);
    let (outer_end_x, outer_end_y) = layout.point(outer, slice.end_angle);

    let mut commands = Vec::with_capacity(6);
    if inner > 0.0 {
        let (inner_end_x, inner_end_y) = layout.point(inner, slice.end_angle);
        let (inner_start_x, inner_start_y) = layout.point(inner, slice.start_angle);
        commands.push(PathCommand::MoveTo {
            x: outer_start_x,
            y: outer_start_y,
        });
        commands.push(PathCommand::ArcTo {
            radius: outer,
            large_arc,
            sweep: true,
            x: outer_end_x,
            y: outer_end_y,
        });
        commands.push(PathCommand::LineTo {
            x: inner_end_x,
            y: inner_end_y,
        });
        commands.push(PathCommand::ArcTo {
            radius: inner,
            large_arc,
            sweep: false,
            x: inner_start_x,
            y: inner_start_y,
        });
    } else {
        commands.push(PathCommand::MoveTo {
            x: layout.center.0,
            y: layout.center.1,
        });
        commands.push(PathCommand::LineTo {
            x: outer_start_x,
            y: outer_start_y,
        });
        commands.push(PathCommand::ArcTo {
            radius: outer,
            large_arc,
            sweep: true,
            x: outer_end_x,
            y: outer_end_y,
        });
    }
    commands.push(PathCommand::Close);
    PathPrimitive::new(commands)
}

/// Full ring drawn as two half arcs per edge; the inner edge winds the other
/// way so the hole stays unfilled.
fn ring_path(layout: PieLayout, start_angle: f64) -> PathPrimitive {
    let half = start_angle + std::f64::consts::PI;
    let mut commands = Vec::with_capacity(8);
    for (radius, sweep) in [(layout.radius, true), (layout.inner_radius, false)] {
        let (start_x, start_y) = layout.point(radius, start_angle);
        let (half_x, half_y) = layout.point(radius, half);
        commands.push(PathCommand::MoveTo {
            x: start_x,
            y: start_y,
        });
        commands.push(PathCommand::ArcTo {
            radius,
            large_arc: false,
            sweep,
            x: half_x,
            y: half_y,
        });
        commands.push(PathCommand::ArcTo {
            radius,
            large_arc: false,
            sweep,
            x: start_x,
            y: start_y,
        });
        commands.push(PathCommand::Close);
    }
    PathPrimitive::new(commands)
}

impl SeriesRenderer for PieRenderer {
    fn render_series(
        &self,
        series: &Series,
        slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let SeriesStyle::Pie(options) = &series.style else {
            return Err(style_mismatch(series, ChartType::Pie));
        };
        let slices = pie_slices(series, options, ctx)?;
        require_points(series, 1, slices.len())?;

        let layout = PieLayout::for_slot(
            ctx.area,
            slot.index,
            slot.count,
            options.radius_ratio,
            options.inner_radius_ratio,
        );
        let label_format = NumberFormat::default().with_decimals(1);
        let mut primitives = Vec::with_capacity(slices.len() * 2);
        let mut labels = Vec::new();
        for slice in &slices {
            let fill = pie_slice_color(options, ctx.config, slice.index);
            let shape: Primitive = match (slice.is_full_circle(), layout.inner_radius > 0.0) {
                (true, false) => {
                    CirclePrimitive::filled(layout.center.0, layout.center.1, layout.radius, fill)
                        .with_stroke(options.stroke, 1.0)
                        .into()
                }
                (true, true) => ring_path(layout, slice.start_angle)
                    .with_fill(Some(fill))
                    .with_stroke(options.stroke, 1.0)
                    .into(),
                (false, _) => slice_path(layout, *slice)
                    .with_fill(Some(fill))
                    .with_stroke(options.stroke, 1.0)
                    .into(),
            };
            primitives.push(shape);

            if options.show_labels && slice.fraction >= MIN_LABEL_FRACTION {
                let (x, y) = layout.label_anchor(*slice);
                let text = format!("{}%", format_number(slice.fraction * 100.0, &label_format));
                labels.push(
                    TextPrimitive::new(
                        text,
                        x,
                        y,
                        FontStyle::new(ctx.config.font_family.clone(), options.label_font_size),
                        fill.contrast(),
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle)
                    .into(),
                );
            }
        }
        primitives.extend(labels);
        Ok(primitives)
    }
}
