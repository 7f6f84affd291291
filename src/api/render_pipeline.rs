use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{AxisManager, ChartArea, ChartType, Series};
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, Primitive, RectPrimitive, RenderFrame};

use super::axis_render_frame_builder::{build_axis_primitives, build_grid_primitives};
use super::legend_layout::{build_legend_primitives, legend_entries};
use super::series_renderer::{RenderContext, SeriesGroup, renderer_for};
use super::Chart;

/// Steps of one render pass, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStage {
    Init,
    ChartArea,
    DefaultAxes,
    PreparedAxes,
    Background,
    Series,
    Axes,
    Legend,
    Finalized,
}

impl RenderStage {
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::ChartArea),
            Self::ChartArea => Some(Self::DefaultAxes),
            Self::DefaultAxes => Some(Self::PreparedAxes),
            Self::PreparedAxes => Some(Self::Background),
            Self::Background => Some(Self::Series),
            Self::Series => Some(Self::Axes),
            Self::Axes => Some(Self::Legend),
            Self::Legend => Some(Self::Finalized),
            Self::Finalized => None,
        }
    }
}

/// Groups series by chart type, keeping first-seen type order and the
/// series order inside each group.
#[must_use]
pub fn group_series(series: &[Series]) -> Vec<SeriesGroup<'_>> {
    let mut groups: IndexMap<ChartType, Vec<&Series>> = IndexMap::new();
    for item in series {
        groups.entry(item.chart_type()).or_default().push(item);
    }
    groups
        .into_iter()
        .map(|(chart_type, series)| SeriesGroup { chart_type, series })
        .collect()
}

/// Single-shot render pass over a chart snapshot.
///
/// `run` consumes the pipeline, so a pass can neither be resumed nor
/// repeated; rendering again means building a new pipeline.
#[derive(Debug)]
pub struct RenderPipeline<'a> {
    chart: &'a Chart,
    stage: RenderStage,
    frame: RenderFrame,
    area: Option<ChartArea>,
    axes: AxisManager,
}

impl<'a> RenderPipeline<'a> {
    #[must_use]
    pub fn new(chart: &'a Chart) -> Self {
        Self {
            chart,
            stage: RenderStage::Init,
            frame: RenderFrame::new(chart.config.viewport),
            area: None,
            axes: AxisManager::new(&chart.x_axes, &chart.y_axes),
        }
    }

    #[must_use]
    pub fn stage(&self) -> RenderStage {
        self.stage
    }

    pub fn run(mut self) -> ChartResult<RenderFrame> {
        self.compute_chart_area()?;
        self.ensure_default_axes()?;
        self.prepare_axes()?;
        self.render_background()?;
        self.render_series()?;
        self.render_axes()?;
        self.render_legend()?;
        self.finalize()
    }

    fn advance(&mut self, next: RenderStage) -> ChartResult<()> {
        if self.stage.next() != Some(next) {
            return Err(ChartError::Configuration(format!(
                "render stage {next:?} cannot follow {:?}",
                self.stage
            )));
        }
        trace!(from = ?self.stage, to = ?next, "render stage");
        self.stage = next;
        Ok(())
    }

    fn area(&self) -> ChartResult<ChartArea> {
        self.area.ok_or_else(|| {
            ChartError::Configuration("chart area used before it was computed".to_owned())
        })
    }

    fn context(&self) -> ChartResult<RenderContext<'_>> {
        Ok(RenderContext::new(
            &self.chart.data,
            &self.axes,
            self.area()?,
            &self.chart.config,
            self.chart.series(),
        ))
    }

    fn compute_chart_area(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::ChartArea)?;
        let config = &self.chart.config;
        config.validate()?;
        let area = ChartArea::from_viewport(config.viewport, config.margins)?;
        debug!(
            x = area.x,
            y = area.y,
            width = area.width,
            height = area.height,
            "chart area"
        );
        self.area = Some(area);
        Ok(())
    }

    fn ensure_default_axes(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::DefaultAxes)?;
        self.axes.ensure_default_axes();
        let horizontal = self
            .chart
            .series()
            .iter()
            .any(|series| series.style.is_horizontal_bar());
        self.axes.set_horizontal(horizontal);
        Ok(())
    }

    fn prepare_axes(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::PreparedAxes)?;
        let series: Vec<&Series> = self.chart.series().iter().collect();
        if !series.iter().any(|item| item.chart_type().is_cartesian()) {
            debug!("no cartesian series, axes left unprepared");
            return Ok(());
        }
        let area = self.area()?;
        self.axes.prepare(&self.chart.data, &series, area)
    }

    fn render_background(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::Background)?;
        let config = &self.chart.config;
        let area = self.area()?;
        self.frame.push(
            CanvasLayerKind::Background,
            RectPrimitive::filled(
                0.0,
                0.0,
                f64::from(config.viewport.width),
                f64::from(config.viewport.height),
                config.background,
            ),
        );
        if let Some(fill) = config.plot_background {
            self.frame.push(
                CanvasLayerKind::Background,
                RectPrimitive::filled(area.x, area.y, area.width, area.height, fill),
            );
        }
        let grid = build_grid_primitives(&self.axes, area, &config.grid)?;
        self.frame.extend(CanvasLayerKind::Grid, grid);
        Ok(())
    }

    fn render_series(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::Series)?;
        let mut output: Vec<Primitive> = Vec::new();
        {
            let ctx = self.context()?;
            for group in group_series(self.chart.series()) {
                debug!(
                    chart_type = group.chart_type.as_str(),
                    series = group.series.len(),
                    "dispatching series group"
                );
                output.extend(renderer_for(group.chart_type).render_group(&group, &ctx)?);
            }
        }
        self.frame.extend(CanvasLayerKind::Series, output);
        Ok(())
    }

    fn render_axes(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::Axes)?;
        let primitives = build_axis_primitives(&self.axes, self.area()?, &self.chart.config)?;
        self.frame.extend(CanvasLayerKind::Axis, primitives);
        Ok(())
    }

    fn render_legend(&mut self) -> ChartResult<()> {
        self.advance(RenderStage::Legend)?;
        let options = &self.chart.config.legend;
        if !options.show {
            return Ok(());
        }
        let primitives = {
            let ctx = self.context()?;
            let entries = legend_entries(self.chart.series(), &ctx)?;
            build_legend_primitives(&entries, &ctx, options)
        };
        if !primitives.is_empty() {
            self.frame.push(
                CanvasLayerKind::Legend,
                Primitive::group("legend-items", primitives),
            );
        }
        Ok(())
    }

    fn finalize(mut self) -> ChartResult<RenderFrame> {
        self.advance(RenderStage::Finalized)?;
        self.frame.validate()?;
        debug!(primitives = self.frame.counts().total(), "render pass finalized");
        Ok(self.frame)
    }
}
