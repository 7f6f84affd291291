use tracing::{debug, warn};

use crate::core::{
    AxisManager, CartesianFrame, ChartArea, ChartType, Color, DataSet, Series, SeriesSample,
    collect_samples,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Primitive;

use super::ChartConfig;
use super::area_renderer::AreaRenderer;
use super::bar_renderer::BarRenderer;
use super::boolean_renderer::BooleanRenderer;
use super::line_renderer::LineRenderer;
use super::pie_renderer::PieRenderer;
use super::polar_renderer::PolarRenderer;
use super::scatter_renderer::ScatterRenderer;
use super::waterfall_renderer::WaterfallRenderer;

/// Series of one chart type, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGroup<'a> {
    pub chart_type: ChartType,
    pub series: Vec<&'a Series>,
}

/// Position of a series within its group, used for side-by-side layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSlot {
    pub index: usize,
    pub count: usize,
}

/// Read-only state every renderer sees during one pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub data: &'a DataSet,
    pub axes: &'a AxisManager,
    pub area: ChartArea,
    pub config: &'a ChartConfig,
    chart_series: &'a [Series],
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(
        data: &'a DataSet,
        axes: &'a AxisManager,
        area: ChartArea,
        config: &'a ChartConfig,
        chart_series: &'a [Series],
    ) -> Self {
        Self {
            data,
            axes,
            area,
            config,
            chart_series,
        }
    }

    /// Explicit style colour, else the palette entry for the series' position.
    #[must_use]
    pub fn series_color(&self, series: &Series) -> Color {
        series.style.color().unwrap_or_else(|| {
            let position = self
                .chart_series
                .iter()
                .position(|item| item.name == series.name)
                .unwrap_or(0);
            self.config.palette_color(position)
        })
    }

    /// Axis frame and index-aligned samples of a cartesian series.
    pub fn cartesian_samples(
        &self,
        series: &Series,
    ) -> ChartResult<(CartesianFrame<'a>, Vec<SeriesSample>)> {
        let frame = self.axes.frame(series.axes)?;
        let (x, y) = self.data.resolve(series)?;
        let samples = collect_samples(x, y, frame.category_by_index());
        Ok((frame, samples))
    }

    /// Y values paired with X by index, for self-scaled series.
    pub fn paired_values(&self, series: &Series) -> ChartResult<Vec<Option<f64>>> {
        let (x, y) = self.data.resolve(series)?;
        Ok(x.iter().zip(y.iter()).map(|(_, value)| value.as_number()).collect())
    }
}

/// One renderer per chart type.
///
/// `render_series` draws a single series; the default `render_group` calls it
/// for each series of the group, dropping series that fail with a data gap.
pub trait SeriesRenderer {
    fn render_series(
        &self,
        series: &Series,
        slot: GroupSlot,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>>;

    fn render_group(
        &self,
        group: &SeriesGroup<'_>,
        ctx: &RenderContext<'_>,
    ) -> ChartResult<Vec<Primitive>> {
        render_each(group, |series, slot| self.render_series(series, slot, ctx))
    }
}

/// Draws every series of `group`, wrapping each output in its own group
/// primitive. Data gaps drop that series; any other error aborts.
pub(super) fn render_each<F>(group: &SeriesGroup<'_>, mut draw: F) -> ChartResult<Vec<Primitive>>
where
    F: FnMut(&Series, GroupSlot) -> ChartResult<Vec<Primitive>>,
{
    let count = group.series.len();
    let mut output = Vec::with_capacity(count);
    for (index, series) in group.series.iter().copied().enumerate() {
        match draw(series, GroupSlot { index, count }) {
            Ok(children) => {
                debug!(
                    series = %series.name,
                    chart_type = series.chart_type().as_str(),
                    primitives = children.len(),
                    "rendered series"
                );
                output.push(Primitive::group(
                    format!("series series-{}", group.chart_type.as_str()),
                    children,
                ));
            }
            Err(err) if err.is_data_gap() => {
                warn!(
                    series = %series.name,
                    error = %err,
                    "skipping series without enough data"
                );
            }
            Err(err) => return Err(err),
        }
    }
    Ok(output)
}

/// Renderer responsible for `chart_type`.
#[must_use]
pub fn renderer_for(chart_type: ChartType) -> &'static dyn SeriesRenderer {
    match chart_type {
        ChartType::Bar => &BarRenderer,
        ChartType::Line => &LineRenderer::STRAIGHT,
        ChartType::Spline => &LineRenderer::SMOOTH,
        ChartType::Area => &AreaRenderer,
        ChartType::Pie => &PieRenderer,
        ChartType::Polar => &PolarRenderer,
        ChartType::Scatter => &ScatterRenderer,
        ChartType::Waterfall => &WaterfallRenderer,
        ChartType::Boolean => &BooleanRenderer,
    }
}

pub(super) fn require_points(series: &Series, required: usize, actual: usize) -> ChartResult<()> {
    if actual < required {
        return Err(ChartError::DataGap {
            series: series.name.clone(),
            required,
            actual,
        });
    }
    Ok(())
}

pub(super) fn style_mismatch(series: &Series, expected: ChartType) -> ChartError {
    ChartError::Configuration(format!(
        "series `{}` has {} style but was dispatched to the {} renderer",
        series.name,
        series.chart_type().as_str(),
        expected.as_str()
    ))
}
