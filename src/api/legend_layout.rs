use crate::core::{Color, NumberFormat, Series, SeriesStyle};
use crate::error::ChartResult;
use crate::render::{FontStyle, Primitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign};

use super::layout_helpers::estimate_label_text_width_px;
use super::pie_renderer::{pie_slice_color, pie_slices};
use super::series_renderer::RenderContext;
use super::{LegendOptions, LegendPosition};

const SWATCH_TEXT_GAP_PX: f64 = 4.0;
const EDGE_PADDING_PX: f64 = 4.0;
const RIGHT_COLUMN_GAP_PX: f64 = 10.0;

/// One swatch plus label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Legend entries in series order; pie series contribute one per slice.
pub fn legend_entries(series: &[Series], ctx: &RenderContext<'_>) -> ChartResult<Vec<LegendEntry>> {
    let mut entries = Vec::new();
    for item in series {
        match &item.style {
            SeriesStyle::Pie(options) => {
                let (x, _) = ctx.data.resolve(item)?;
                for slice in pie_slices(item, options, ctx)? {
                    let label = x
                        .get(slice.index)
                        .map(|value| value.label(&NumberFormat::default()))
                        .unwrap_or_default();
                    entries.push(LegendEntry {
                        label,
                        color: pie_slice_color(options, ctx.config, slice.index),
                    });
                }
            }
            _ => entries.push(LegendEntry {
                label: item.display_label().to_owned(),
                color: ctx.series_color(item),
            }),
        }
    }
    entries.retain(|entry| !entry.label.is_empty());
    Ok(entries)
}

/// Lays entries out in a centred row (top/bottom) or a column (right).
pub(super) fn build_legend_primitives(
    entries: &[LegendEntry],
    ctx: &RenderContext<'_>,
    options: &LegendOptions,
) -> Vec<Primitive> {
    if entries.is_empty() {
        return Vec::new();
    }

    let viewport = ctx.config.viewport;
    let font = FontStyle::new(ctx.config.font_family.clone(), options.font_size);
    let row_height = options.font_size.max(options.swatch_size);
    let widths: Vec<f64> = entries
        .iter()
        .map(|entry| {
            options.swatch_size
                + SWATCH_TEXT_GAP_PX
                + estimate_label_text_width_px(&entry.label, options.font_size)
        })
        .collect();

    let positions: Vec<(f64, f64)> = match options.position {
        LegendPosition::Top | LegendPosition::Bottom => {
            let total = widths.iter().sum::<f64>()
                + options.item_spacing * (entries.len().saturating_sub(1)) as f64;
            let center_y = if options.position == LegendPosition::Top {
                EDGE_PADDING_PX + row_height * 0.5
            } else {
                f64::from(viewport.height) - EDGE_PADDING_PX - row_height * 0.5
            };
            let mut x = ((f64::from(viewport.width) - total) * 0.5).max(EDGE_PADDING_PX);
            widths
                .iter()
                .map(|width| {
                    let position = (x, center_y);
                    x += width + options.item_spacing;
                    position
                })
                .collect()
        }
        LegendPosition::Right => {
            let x = ctx.area.right() + RIGHT_COLUMN_GAP_PX;
            (0..entries.len())
                .map(|index| {
                    let center_y = ctx.area.y
                        + row_height * 0.5
                        + index as f64 * (row_height + options.item_spacing * 0.5);
                    (x, center_y)
                })
                .collect()
        }
    };

    let mut primitives = Vec::with_capacity(entries.len() * 2);
    for (entry, (x, center_y)) in entries.iter().zip(positions) {
        primitives.push(
            RectPrimitive::filled(
                x,
                center_y - options.swatch_size * 0.5,
                options.swatch_size,
                options.swatch_size,
                entry.color,
            )
            .into(),
        );
        primitives.push(
            TextPrimitive::new(
                entry.label.clone(),
                x + options.swatch_size + SWATCH_TEXT_GAP_PX,
                center_y,
                font.clone(),
                options.color,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle)
            .into(),
        );
    }
    primitives
}
