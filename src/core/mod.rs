pub mod area_series;
pub mod axis;
pub mod bar_series;
pub mod boolean_series;
pub mod color;
pub mod format;
pub mod line_series;
pub mod numeric;
pub mod pie_series;
pub mod polar_series;
pub mod scale;
pub mod scatter_series;
pub mod series;
pub mod types;
pub mod value;
pub mod waterfall_series;

pub use area_series::{AreaGeometry, AreaVertex, project_area_runs};
pub use axis::{
    Axis, AxisKind, AxisLabelFormat, AxisManager, AxisOptions, AxisOptionsPatch, AxisPosition,
    AxisScaleKind, CartesianFrame, PreparedAxis, ResolvedScaleKind,
};
pub use bar_series::{BarGeometry, BarRect, BarSlot, project_bars};
pub use boolean_series::{
    MIN_STATE_SAMPLES, StateRect, StateRun, StateSample, TimelineLane, collect_state_samples,
    compress_state_runs, project_state_runs,
};
pub use color::{Color, default_palette};
pub use format::{
    NumberFormat, auto_decimals, format_number, format_timestamp, validate_timestamp_pattern,
};
pub use line_series::{CubicSegment, LineVertex, project_line_runs, spline_segments};
pub use numeric::{DataRange, average, data_range, find_max, find_min, sum};
pub use pie_series::{PieLayout, PieSlice, layout_pie_slices};
pub use polar_series::{
    MIN_POLAR_CATEGORIES, PolarLayout, polar_to_cartesian, project_polar_polygon, spoke_angle,
};
pub use scale::{LinearScale, NiceScale, compute_nice_scale, map_domain_to_range, nice_interval};
pub use scatter_series::{ScatterPoint, project_scatter_points};
pub use series::{
    AreaOptions, AxisBinding, BarOptions, BooleanOptions, ChartType, DataSet, LabelSide,
    LineOptions, PieOptions, PolarOptions, ScatterOptions, Series, SeriesSample, SeriesStyle,
    TimelineLabelOptions, WaterfallOptions, collect_samples, waterfall_steps,
};
pub use types::{ChartArea, Margins, Orientation, Viewport};
pub use value::{Value, ValueCollection};
pub use waterfall_series::{
    WaterfallBar, WaterfallConnector, WaterfallGeometry, WaterfallStepKind, project_waterfall,
};
