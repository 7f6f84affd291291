use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Color, Orientation, ValueCollection};
use crate::error::{ChartError, ChartResult};

/// Chart type tag used to group series into render passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    Line,
    Spline,
    Area,
    Pie,
    Polar,
    Scatter,
    Waterfall,
    Boolean,
}

impl ChartType {
    /// Whether the type plots against the shared X/Y axes.
    ///
    /// Pie, polar and boolean series scale themselves against the chart area.
    #[must_use]
    pub fn is_cartesian(self) -> bool {
        !matches!(self, Self::Pie | Self::Polar | Self::Boolean)
    }

    /// Types whose category axis defaults to discrete bands.
    #[must_use]
    pub fn prefers_category_axis(self) -> bool {
        matches!(self, Self::Bar | Self::Waterfall)
    }

    /// Types whose value axis defaults to including zero.
    #[must_use]
    pub fn prefers_zero_baseline(self) -> bool {
        matches!(self, Self::Bar | Self::Area | Self::Waterfall)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Spline => "spline",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Polar => "polar",
            Self::Scatter => "scatter",
            Self::Waterfall => "waterfall",
            Self::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOptions {
    pub color: Option<Color>,
    pub stroke: Option<Color>,
    /// Bars run left-to-right with categories on the Y axis.
    pub horizontal: bool,
    /// Share of each category band covered by the bar group.
    pub bar_width_ratio: f64,
    pub corner_radius: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            color: None,
            stroke: None,
            horizontal: false,
            bar_width_ratio: 0.8,
            corner_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    pub color: Option<Color>,
    pub stroke_width: f64,
    pub show_markers: bool,
    pub marker_radius: f64,
    /// Catmull-Rom control point factor used by spline series.
    pub smoothing: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            color: None,
            stroke_width: 2.0,
            show_markers: false,
            marker_radius: 3.0,
            smoothing: 1.0 / 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOptions {
    pub color: Option<Color>,
    pub stroke_width: f64,
    pub fill_opacity: f64,
}

impl Default for AreaOptions {
    fn default() -> Self {
        Self {
            color: None,
            stroke_width: 1.5,
            fill_opacity: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieOptions {
    /// Slice colours; empty falls back to the chart palette.
    pub colors: Vec<Color>,
    pub stroke: Option<Color>,
    pub radius_ratio: f64,
    /// Non-zero values draw a donut.
    pub inner_radius_ratio: f64,
    pub start_angle_deg: f64,
    pub show_labels: bool,
    pub label_font_size: f64,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            stroke: Some(Color::WHITE),
            radius_ratio: 0.9,
            inner_radius_ratio: 0.0,
            start_angle_deg: -90.0,
            show_labels: true,
            label_font_size: 11.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarOptions {
    pub color: Option<Color>,
    pub stroke_width: f64,
    pub fill_opacity: f64,
    pub tick_count: usize,
    pub grid_color: Color,
    pub radius_ratio: f64,
}

impl Default for PolarOptions {
    fn default() -> Self {
        Self {
            color: None,
            stroke_width: 2.0,
            fill_opacity: 0.25,
            tick_count: 5,
            grid_color: Color::rgb(0xcc, 0xcc, 0xcc),
            radius_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOptions {
    pub color: Option<Color>,
    pub stroke: Option<Color>,
    pub radius: f64,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            color: None,
            stroke: None,
            radius: 3.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallOptions {
    pub positive_color: Color,
    pub negative_color: Color,
    pub total_color: Color,
    pub show_total: bool,
    pub total_label: String,
    pub show_connectors: bool,
    pub bar_width_ratio: f64,
}

impl Default for WaterfallOptions {
    fn default() -> Self {
        Self {
            positive_color: Color::rgb(0x2c, 0xa0, 0x2c),
            negative_color: Color::rgb(0xd6, 0x27, 0x28),
            total_color: Color::rgb(0x1f, 0x77, 0xb4),
            show_total: true,
            total_label: "Total".to_owned(),
            show_connectors: true,
            bar_width_ratio: 0.7,
        }
    }
}

/// Where a timeline label sits relative to its lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelSide {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineLabelOptions {
    pub show: bool,
    pub side: LabelSide,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: Color,
}

impl Default for TimelineLabelOptions {
    fn default() -> Self {
        Self {
            show: false,
            side: LabelSide::Left,
            font_family: "sans-serif".to_owned(),
            font_size: 12.0,
            font_weight: "normal".to_owned(),
            color: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanOptions {
    pub true_color: Color,
    pub false_color: Color,
    pub orientation: Orientation,
    pub label: TimelineLabelOptions,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            true_color: Color::rgb(0x2c, 0xa0, 0x2c),
            false_color: Color::rgb(0xd6, 0x27, 0x28),
            orientation: Orientation::Horizontal,
            label: TimelineLabelOptions::default(),
        }
    }
}

/// Chart type plus its type-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesStyle {
    Bar(BarOptions),
    Line(LineOptions),
    Spline(LineOptions),
    Area(AreaOptions),
    Pie(PieOptions),
    Polar(PolarOptions),
    Scatter(ScatterOptions),
    Waterfall(WaterfallOptions),
    Boolean(BooleanOptions),
}

impl SeriesStyle {
    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        match self {
            Self::Bar(_) => ChartType::Bar,
            Self::Line(_) => ChartType::Line,
            Self::Spline(_) => ChartType::Spline,
            Self::Area(_) => ChartType::Area,
            Self::Pie(_) => ChartType::Pie,
            Self::Polar(_) => ChartType::Polar,
            Self::Scatter(_) => ChartType::Scatter,
            Self::Waterfall(_) => ChartType::Waterfall,
            Self::Boolean(_) => ChartType::Boolean,
        }
    }

    /// Explicitly configured series colour, if the style has one.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Bar(options) => options.color,
            Self::Line(options) | Self::Spline(options) => options.color,
            Self::Area(options) => options.color,
            Self::Polar(options) => options.color,
            Self::Scatter(options) => options.color,
            Self::Waterfall(options) => Some(options.positive_color),
            Self::Boolean(options) => Some(options.true_color),
            Self::Pie(_) => None,
        }
    }

    #[must_use]
    pub fn is_horizontal_bar(&self) -> bool {
        matches!(self, Self::Bar(options) if options.horizontal)
    }
}

/// Axis ids a cartesian series plots against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AxisBinding {
    pub x: usize,
    pub y: usize,
}

/// Named pairing of an X and a Y collection with a chart style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub x: String,
    pub y: String,
    pub style: SeriesStyle,
    #[serde(default)]
    pub axes: AxisBinding,
    /// Legend/timeline text; defaults to `name`.
    #[serde(default)]
    pub label: Option<String>,
}

impl Series {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        style: SeriesStyle,
    ) -> Self {
        Self {
            name: name.into(),
            x: x.into(),
            y: y.into(),
            style,
            axes: AxisBinding::default(),
            label: None,
        }
    }

    #[must_use]
    pub fn with_axes(mut self, x: usize, y: usize) -> Self {
        self.axes = AxisBinding { x, y };
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.style.chart_type()
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Insertion-ordered named collections shared between series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSet {
    collections: IndexMap<String, ValueCollection>,
}

impl DataSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: impl Into<ValueCollection>) {
        self.collections.insert(name.into(), values.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValueCollection> {
        self.collections.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Looks up both collections a series references.
    pub fn resolve(&self, series: &Series) -> ChartResult<(&ValueCollection, &ValueCollection)> {
        let lookup = |name: &str| {
            self.get(name).ok_or_else(|| {
                ChartError::Configuration(format!(
                    "series `{}` references unknown collection `{name}`",
                    series.name
                ))
            })
        };
        Ok((lookup(&series.x)?, lookup(&series.y)?))
    }
}

/// One index-aligned X/Y pair read from a series.
///
/// `category` is the position along the category axis: the sample index for
/// band axes, the numeric X value otherwise. Either side is `None` when the
/// raw sample is a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub index: usize,
    pub category: Option<f64>,
    pub value: Option<f64>,
}

impl SeriesSample {
    #[must_use]
    pub fn point(self) -> Option<(f64, f64)> {
        self.category.zip(self.value)
    }
}

/// Pairs X and Y by index, dropping entries past the shorter collection.
#[must_use]
pub fn collect_samples(
    x: &ValueCollection,
    y: &ValueCollection,
    category_by_index: bool,
) -> Vec<SeriesSample> {
    x.iter()
        .zip(y.iter())
        .enumerate()
        .map(|(index, (x_value, y_value))| SeriesSample {
            index,
            category: if category_by_index {
                Some(index as f64)
            } else {
                x_value.as_number()
            },
            value: y_value.as_number(),
        })
        .collect()
}

/// Running totals for waterfall series, starting from zero.
///
/// Returns `(start, end)` per sample; gaps keep the running total unchanged.
#[must_use]
pub fn waterfall_steps(y: &[Option<f64>]) -> Vec<(f64, f64)> {
    let mut total = 0.0;
    y.iter()
        .map(|value| {
            let start = total;
            total += value.unwrap_or(0.0);
            (start, total)
        })
        .collect()
}
