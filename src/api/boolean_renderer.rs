use tracing::trace;

use crate::core::{
    BooleanOptions, ChartArea, ChartType, LabelSide, MIN_STATE_SAMPLES, Orientation, Series,
    SeriesStyle, TimelineLane, collect_state_samples, compress_state_runs, project_state_runs,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{FontStyle, Primitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign};

use super::series_renderer::{
    GroupSlot, RenderContext, SeriesRenderer, require_points, style_mismatch,
};

const LABEL_GAP_PX: f64 = 6.0;

/// State timelines: one rectangle per run of equal consecutive states.
///
/// Boolean series of one group split the chart area into equal lanes across
/// the time direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRenderer;

/// Pixel rectangle `(x, y, width, height)` of one lane.
fn lane_bounds(area: ChartArea, orientation: Orientation, lane: TimelineLane) -> (f64, f64, f64, f64) {
    match orientation {
        Orientation::Horizontal => {
            let (y, height) = lane.span(area.y, area.height);
            (area.x, y, area.width, height)
        }
        Orientation::Vertical => {
            let (x, width) = lane.span(area.x, area.width);
            (x, area.y, width, area.height)
        }
    }
}

fn lane_label(
    series: &Series,
    options: &BooleanOptions,
    bounds: (f64, f64, f64, f64),
) -> TextPrimitive {
    let label = &options.label;
    let (x, y, width, height) = bounds;
    let (anchor_x, anchor_y, h_align, v_align) = match label.side {
        LabelSide::Left => (
            x - LABEL_GAP_PX,
            y + height * 0.5,
            TextHAlign::Right,
            TextVAlign::Middle,
        ),
        LabelSide::Right => (
            x + width + LABEL_GAP_PX,
            y + height * 0.5,
            TextHAlign::Left,
            TextVAlign::Middle,
        ),
        LabelSide::Top => (
            x + width * 0.5,
            y - LABEL_GAP_PX,
            TextHAlign::Center,
            TextVAlign::Baseline,
        ),
        LabelSide::Bottom => (
            x + width * 0.5,
            y + height + LABEL_GAP_PX,
            TextHAlign::Center,
            TextVAlign::Top,
        ),
    };
    TextPrimitive::new(
        series.display_label(),
        anchor_x,
        anchor_y,
        FontStyle::new(label.font_family.clone(), label.font_size)
            .with_weight(label.font_weight.clone()),
        label.color,
        h_align,
    )
    .with_v_align(v_align)
}

impl SeriesRenderer for BooleanRenderer {
    fn render_series(
        &self,
        series: &Series,
        slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        let SeriesStyle::Boolean(options) = &series.style else {
            return Err(style_mismatch(series, ChartType::Boolean));
        };
        let (times, states) = ctx.data.resolve(series)?;
        let samples = collect_state_samples(times, states);
        require_points(series, MIN_STATE_SAMPLES, samples.len())?;

        let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
            return Err(ChartError::DataGap {
                series: series.name.clone(),
                required: MIN_STATE_SAMPLES,
                actual: 0,
            });
        };
        if first.time == last.time {
            // Every sample shares one timestamp: no interval to scale against.
            return Err(ChartError::DataGap {
                series: series.name.clone(),
                required: MIN_STATE_SAMPLES,
                actual: 1,
            });
        }

        let runs = compress_state_runs(&samples);
        trace!(
            series = %series.name,
            samples = samples.len(),
            runs = runs.len(),
            "compressed state runs"
        );
        let lane = TimelineLane {
            index: slot.index,
            count: slot.count,
        };
        let rects = project_state_runs(
            &runs,
            (first.time, last.time),
            ctx.area,
            options.orientation,
            lane,
        )?;

        let mut primitives: Vec<Primitive> = rects
            .into_iter()
            .map(|rect| {
                let fill = if rect.state {
                    options.true_color
                } else {
                    options.false_color
                };
                RectPrimitive::filled(rect.x, rect.y, rect.width, rect.height, fill).into()
            })
            .collect();

        if options.label.show && !series.display_label().is_empty() {
            let bounds = lane_bounds(ctx.area, options.orientation, lane);
            primitives.push(lane_label(series, options, bounds).into());
        }
        Ok(primitives)
    }
}
