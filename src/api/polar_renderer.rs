use tracing::debug;

use crate::core::{
    ChartType, MIN_POLAR_CATEGORIES, NumberFormat, PolarLayout, PolarOptions, Series,
    SeriesStyle, compute_nice_scale, project_polar_polygon, spoke_angle,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    FontStyle, LinePrimitive, PathPrimitive, Primitive, TextPrimitive, TextVAlign,
};

use super::layout_helpers::align_for_angle;
use super::series_renderer::{
    GroupSlot, RenderContext, SeriesGroup, SeriesRenderer, render_each, style_mismatch,
};

const LABEL_GAP_PX: f64 = 10.0;

/// Radar chart: every series of the group shares one web and radial scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarRenderer;

fn polar_options(series: &Series) -> ChartResult<&PolarOptions> {
    match &series.style {
        SeriesStyle::Polar(options) => Ok(options),
        _ => Err(style_mismatch(series, ChartType::Polar)),
    }
}

fn shared_layout(
    values: &[Vec<Option<f64>>],
    options: &PolarOptions,
    ctx: &RenderContext<'_>,
) -> ChartResult<Option<PolarLayout>> {
    let category_count = values.iter().map(Vec::len).max().unwrap_or(0);
    if category_count < MIN_POLAR_CATEGORIES {
        return Ok(None);
    }

    let max = values
        .iter()
        .flatten()
        .flatten()
        .copied()
        .fold(None, |acc: Option<f64>, value| {
            Some(acc.map_or(value, |acc| acc.max(value)))
        })
        .unwrap_or(1.0);
    let radial = compute_nice_scale(0.0, max.max(0.0), options.tick_count, true)?;
    let radius = ctx.area.width.min(ctx.area.height) * 0.5 * options.radius_ratio.clamp(0.0, 1.0);
    Ok(Some(PolarLayout {
        center: ctx.area.center(),
        radius,
        category_count,
        radial,
    }))
}

fn web_primitives(
    layout: &PolarLayout,
    options: &PolarOptions,
    labels: &[String],
    ctx: &RenderContext<'_>,
) -> ChartResult<Vec<Primitive>> {
    let mut web = Vec::new();
    for tick in layout.radial.ticks() {
        if tick <= layout.radial.min {
            continue;
        }
        web.push(
            PathPrimitive::polygon(&layout.ring(tick)?)
                .with_stroke(Some(options.grid_color), 1.0)
                .into(),
        );
    }
    for (x, y) in layout.spokes() {
        web.push(
            LinePrimitive::new(layout.center.0, layout.center.1, x, y, 1.0, options.grid_color)
                .into(),
        );
    }

    let font = FontStyle::new(ctx.config.font_family.clone(), 11.0);
    for (index, label) in labels.iter().enumerate().take(layout.category_count) {
        if label.is_empty() {
            continue;
        }
        let angle = spoke_angle(index, layout.category_count);
        let radius = layout.radius + LABEL_GAP_PX;
        web.push(
            TextPrimitive::new(
                label.clone(),
                layout.center.0 + radius * angle.cos(),
                layout.center.1 + radius * angle.sin(),
                font.clone(),
                ctx.config.text_color,
                align_for_angle(angle),
            )
            .with_v_align(TextVAlign::Middle)
            .into(),
        );
    }
    Ok(web)
}

impl SeriesRenderer for PolarRenderer {
    /// Polar series are drawn through `render_group`; a lone series gets a
    /// web of its own.
    fn render_series(
        &self,
        series: &Series,
        _slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let group = SeriesGroup {
            chart_type: ChartType::Polar,
            series: vec![series],
        };
        self.render_group(&group, ctx)
    }

    fn render_group(
        &self,
        group: &SeriesGroup<'_>,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let Some(first) = group.series.first() else {
            return Ok(Vec::new());
        };
        let base_options = polar_options(first)?;
        let values = group
            .series
            .iter()
            .map(|series| ctx.paired_values(series))
            .collect::<ChartResult<Vec<_>>>()?;
        let layout = shared_layout(&values, base_options, ctx)?;

        let mut output = Vec::new();
        if let Some(layout) = &layout {
            // Spoke labels come from the first series spanning every category.
            let widest = values
                .iter()
                .position(|series_values| series_values.len() == layout.category_count)
                .unwrap_or(0);
            let source = group.series.get(widest).copied().unwrap_or(*first);
            let (x, _) = ctx.data.resolve(source)?;
            let labels: Vec<String> = x
                .iter()
                .take(layout.category_count)
                .map(|value| value.label(&NumberFormat::default()))
                .collect();
            debug!(
                categories = layout.category_count,
                radial_max = layout.radial.max,
                "polar web prepared"
            );
            output.push(Primitive::group(
                "polar-web",
                web_primitives(layout, base_options, &labels, ctx)?,
            ));
        }

        output.extend(render_each(group, |series, slot| {
            let options = polar_options(series)?;
            let series_values = &values[slot.index];
            let numeric = series_values.iter().flatten().count();
            let Some(layout) = layout.as_ref().filter(|_| numeric >= MIN_POLAR_CATEGORIES) else {
                return Err(ChartError::DataGap {
                    series: series.name.clone(),
                    required: MIN_POLAR_CATEGORIES,
                    actual: numeric,
                });
            };

            let color = ctx.series_color(series);
            let polygon = project_polar_polygon(series_values, layout)?;
            Ok(vec![
                PathPrimitive::polygon(&polygon)
                    .with_fill(Some(color.with_alpha(options.fill_opacity)))
                    .with_stroke(Some(color), options.stroke_width)
                    .into(),
            ])
        })?);
        Ok(output)
    }
}
