mod area_renderer;
mod axis_render_frame_builder;
mod bar_renderer;
mod batch;
mod boolean_renderer;
mod chart;
mod chart_config;
mod layout_helpers;
mod legend_layout;
mod line_renderer;
mod pie_renderer;
mod polar_renderer;
mod render_pipeline;
mod scatter_renderer;
mod series_renderer;
mod waterfall_renderer;

pub use area_renderer::AreaRenderer;
pub use bar_renderer::BarRenderer;
pub use batch::render_svg_batch;
pub use boolean_renderer::BooleanRenderer;
pub use chart::{CHART_JSON_SCHEMA_V1, Chart, ChartJsonContractV1};
pub use chart_config::{
    ChartConfig, ChartConfigPatch, GridOptions, LegendOptions, LegendOptionsPatch,
    LegendPosition,
};
pub use legend_layout::{LegendEntry, legend_entries};
pub use line_renderer::LineRenderer;
pub use pie_renderer::PieRenderer;
pub use polar_renderer::PolarRenderer;
pub use render_pipeline::{RenderPipeline, RenderStage, group_series};
pub use scatter_renderer::ScatterRenderer;
pub use series_renderer::{
    GroupSlot, RenderContext, SeriesGroup, SeriesRenderer, renderer_for,
};
pub use waterfall_renderer::WaterfallRenderer;
