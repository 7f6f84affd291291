use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::format::{
    NumberFormat, format_number, format_timestamp, validate_timestamp_pattern,
};
use crate::core::numeric::data_range;
use crate::core::scale::{LinearScale, NiceScale, compute_nice_scale, snap_to_interval};
use crate::core::series::{ChartType, SeriesStyle, waterfall_steps};
use crate::core::{AxisBinding, ChartArea, Color, DataSet, Series, Value};
use crate::error::{ChartError, ChartResult};

/// Which axis set an axis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    X,
    Y,
}

impl AxisKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Requested scale type; `Auto` resolves per axis role and bound series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisScaleKind {
    #[default]
    Auto,
    Linear,
    Category,
}

/// Scale type an axis actually uses after preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedScaleKind {
    Linear,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisLabelFormat {
    Number(NumberFormat),
    /// Values are unix seconds formatted with a strftime pattern.
    Timestamp { pattern: String },
}

impl Default for AxisLabelFormat {
    fn default() -> Self {
        Self::Number(NumberFormat::default())
    }
}

/// Side of the chart area an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    /// Left for Y axes, bottom for X axes.
    Start,
    /// Right for Y axes, top for X axes.
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_count: usize,
    pub include_zero: Option<bool>,
    pub scale: AxisScaleKind,
    pub title: Option<String>,
    pub label_format: AxisLabelFormat,
    pub show: bool,
    pub position: Option<AxisPosition>,
    pub color: Color,
    pub font_size: f64,
    pub tick_length: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            tick_count: 5,
            include_zero: None,
            scale: AxisScaleKind::Auto,
            title: None,
            label_format: AxisLabelFormat::default(),
            show: true,
            position: None,
            color: Color::rgb(0x66, 0x66, 0x66),
            font_size: 11.0,
            tick_length: 5.0,
        }
    }
}

impl AxisOptions {
    #[must_use]
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_include_zero(mut self, include_zero: bool) -> Self {
        self.include_zero = Some(include_zero);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: AxisScaleKind) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_label_format(mut self, label_format: AxisLabelFormat) -> Self {
        self.label_format = label_format;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns a copy with every `Some` field of `patch` applied.
    #[must_use]
    pub fn apply(self, patch: AxisOptionsPatch) -> Self {
        Self {
            min: patch.min.or(self.min),
            max: patch.max.or(self.max),
            tick_count: patch.tick_count.unwrap_or(self.tick_count),
            include_zero: patch.include_zero.or(self.include_zero),
            scale: patch.scale.unwrap_or(self.scale),
            title: patch.title.or(self.title),
            label_format: patch.label_format.unwrap_or(self.label_format),
            show: patch.show.unwrap_or(self.show),
            position: patch.position.or(self.position),
            color: patch.color.unwrap_or(self.color),
            font_size: patch.font_size.unwrap_or(self.font_size),
            tick_length: patch.tick_length.unwrap_or(self.tick_length),
        }
    }
}

/// Partial axis options; `None` keeps the base value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptionsPatch {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_count: Option<usize>,
    pub include_zero: Option<bool>,
    pub scale: Option<AxisScaleKind>,
    pub title: Option<String>,
    pub label_format: Option<AxisLabelFormat>,
    pub show: Option<bool>,
    pub position: Option<AxisPosition>,
    pub color: Option<Color>,
    pub font_size: Option<f64>,
    pub tick_length: Option<f64>,
}

/// Scale state computed for one axis during a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedAxis {
    pub scale_kind: ResolvedScaleKind,
    pub nice: NiceScale,
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub ticks: Vec<f64>,
    /// Band labels for category axes; empty for linear axes.
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    kind: AxisKind,
    id: usize,
    options: AxisOptions,
    prepared: Option<PreparedAxis>,
}

impl Axis {
    #[must_use]
    pub fn new(kind: AxisKind, id: usize, options: AxisOptions) -> Self {
        Self {
            kind,
            id,
            options,
            prepared: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    #[must_use]
    pub fn prepared(&self) -> Option<&PreparedAxis> {
        self.prepared.as_ref()
    }

    fn require_prepared(&self) -> ChartResult<&PreparedAxis> {
        self.prepared.as_ref().ok_or_else(|| {
            ChartError::Configuration(format!(
                "{} axis #{} used before preparation",
                self.kind.as_str(),
                self.id
            ))
        })
    }

    pub fn scale(&self) -> ChartResult<LinearScale> {
        let prepared = self.require_prepared()?;
        LinearScale::new(
            prepared.domain.0,
            prepared.domain.1,
            prepared.range.0,
            prepared.range.1,
        )
    }

    /// Maps a domain value onto this axis' pixel range.
    pub fn map(&self, value: f64) -> ChartResult<f64> {
        self.scale()?.domain_to_pixel(value)
    }

    #[must_use]
    pub fn is_category(&self) -> bool {
        self.prepared
            .as_ref()
            .is_some_and(|prepared| prepared.scale_kind == ResolvedScaleKind::Category)
    }

    /// Resolves `(pixel, label)` for every tick.
    pub fn tick_positions(&self) -> ChartResult<Vec<(f64, String)>> {
        let prepared = self.require_prepared()?;
        let scale = self.scale()?;
        prepared
            .ticks
            .iter()
            .enumerate()
            .map(|(index, tick)| {
                let pixel = scale.domain_to_pixel(*tick)?;
                Ok((pixel, self.tick_label(prepared, index, *tick)))
            })
            .collect()
    }

    fn tick_label(&self, prepared: &PreparedAxis, index: usize, tick: f64) -> String {
        if prepared.scale_kind == ResolvedScaleKind::Category {
            return prepared.labels.get(index).cloned().unwrap_or_default();
        }
        match &self.options.label_format {
            AxisLabelFormat::Timestamp { pattern } => format_timestamp(tick, pattern),
            AxisLabelFormat::Number(format) => {
                if format.decimals.is_some() {
                    format_number(tick, format)
                } else {
                    let decimals = interval_decimals(prepared.nice.tick_interval);
                    format_number(tick, &format.clone().with_decimals(decimals))
                }
            }
        }
    }

    fn prepare(&mut self, input: AxisPreparation<'_>) -> ChartResult<()> {
        if let AxisLabelFormat::Timestamp { pattern } = &self.options.label_format {
            validate_timestamp_pattern(pattern)?;
        }
        let range = match self.kind {
            AxisKind::X => (input.area.x, input.area.right()),
            AxisKind::Y => (input.area.bottom(), input.area.y),
        };
        let category_role = (self.kind == AxisKind::X) != input.horizontal;
        let prepared = if category_role && self.resolve_category(&input) {
            self.prepare_category(&input, range)?
        } else {
            let values = collect_axis_values(&input, category_role)?;
            let include_zero = self.options.include_zero.unwrap_or_else(|| {
                !category_role
                    && input
                        .bound
                        .iter()
                        .any(|series| series.chart_type().prefers_zero_baseline())
            });
            self.prepare_linear(&values, include_zero, range)?
        };

        debug!(
            axis = self.kind.as_str(),
            id = self.id,
            domain_min = prepared.domain.0,
            domain_max = prepared.domain.1,
            ticks = prepared.ticks.len(),
            "prepared axis"
        );
        self.prepared = Some(prepared);
        Ok(())
    }

    fn resolve_category(&self, input: &AxisPreparation<'_>) -> bool {
        match self.options.scale {
            AxisScaleKind::Category => true,
            AxisScaleKind::Linear => false,
            AxisScaleKind::Auto => input.bound.iter().any(|series| {
                series.chart_type().prefers_category_axis()
                    || input.data.get(&series.x).is_some_and(|x| {
                        x.iter()
                            .any(|value| !value.is_null() && value.as_number().is_none())
                    })
            }),
        }
    }

    fn prepare_category(
        &self,
        input: &AxisPreparation<'_>,
        range: (f64, f64),
    ) -> ChartResult<PreparedAxis> {
        let mut labels: Vec<String> = Vec::new();
        for series in &input.bound {
            let (x, y) = input.data.resolve(series)?;
            let paired = x.len().min(y.len());
            let mut series_labels: Vec<String> = x
                .iter()
                .take(paired)
                .map(|value| self.category_label(value))
                .collect();
            if let SeriesStyle::Waterfall(options) = &series.style {
                if options.show_total {
                    series_labels.push(options.total_label.clone());
                }
            }
            if series_labels.len() > labels.len() {
                labels = series_labels;
            }
        }

        if labels.is_empty() {
            return Err(self.no_data_error());
        }
        let count = labels.len();
        let domain = (-0.5, count as f64 - 0.5);
        Ok(PreparedAxis {
            scale_kind: ResolvedScaleKind::Category,
            nice: NiceScale {
                min: domain.0,
                max: domain.1,
                tick_interval: 1.0,
                tick_count: count,
            },
            domain,
            range,
            ticks: (0..count).map(|index| index as f64).collect(),
            labels,
        })
    }

    fn category_label(&self, value: &Value) -> String {
        match (&self.options.label_format, value.as_number()) {
            (AxisLabelFormat::Timestamp { pattern }, Some(seconds)) => {
                format_timestamp(seconds, pattern)
            }
            (AxisLabelFormat::Number(format), _) => value.label(format),
            (AxisLabelFormat::Timestamp { .. }, None) => value.label(&NumberFormat::default()),
        }
    }

    fn prepare_linear(
        &self,
        values: &[Value],
        include_zero: bool,
        range: (f64, f64),
    ) -> ChartResult<PreparedAxis> {
        if let (Some(min), Some(max)) = (self.options.min, self.options.max) {
            if !(min < max) {
                return Err(ChartError::Configuration(format!(
                    "{} axis #{} explicit min {min} must be below max {max}",
                    self.kind.as_str(),
                    self.id
                )));
            }
            let nice = compute_nice_scale(min, max, self.options.tick_count, false)?;
            return Ok(PreparedAxis {
                scale_kind: ResolvedScaleKind::Linear,
                nice,
                domain: (min, max),
                range,
                ticks: ticks_within(min, max, nice.tick_interval),
                labels: Vec::new(),
            });
        }

        let data = data_range(values);
        let low = self.options.min.or(data.map(|range| range.min));
        let high = self.options.max.or(data.map(|range| range.max));
        let (Some(low), Some(high)) = (low, high) else {
            return Err(self.no_data_error());
        };

        let nice = compute_nice_scale(low, high, self.options.tick_count, include_zero)?;
        Ok(PreparedAxis {
            scale_kind: ResolvedScaleKind::Linear,
            nice,
            domain: (nice.min, nice.max),
            range,
            ticks: nice.ticks(),
            labels: Vec::new(),
        })
    }

    fn no_data_error(&self) -> ChartError {
        ChartError::Configuration(format!(
            "{} axis #{} has no bound data and no explicit min/max",
            self.kind.as_str(),
            self.id
        ))
    }
}

struct AxisPreparation<'a> {
    data: &'a DataSet,
    bound: SmallVec<[&'a Series; 4]>,
    area: ChartArea,
    horizontal: bool,
}

/// Values each bound series contributes to the axis domain.
fn collect_axis_values(
    input: &AxisPreparation<'_>,
    category_role: bool,
) -> ChartResult<Vec<Value>> {
    let mut values = Vec::new();
    for series in &input.bound {
        let (x, y) = input.data.resolve(series)?;
        if category_role {
            values.extend(x.iter().zip(y.iter()).map(|(x_value, _)| x_value.clone()));
        } else if series.chart_type() == ChartType::Waterfall {
            let deltas: Vec<Option<f64>> = x
                .iter()
                .zip(y.iter())
                .map(|(_, y_value)| y_value.as_number())
                .collect();
            values.push(Value::Number(0.0));
            values.extend(
                waterfall_steps(&deltas)
                    .into_iter()
                    .map(|(_, end)| Value::Number(end)),
            );
        } else {
            values.extend(x.iter().zip(y.iter()).map(|(_, y_value)| y_value.clone()));
        }
    }
    Ok(values)
}

/// Interval multiples inside `[min, max]`.
fn ticks_within(min: f64, max: f64, interval: f64) -> Vec<f64> {
    let first = (min / interval - 1e-9).ceil();
    let last = (max / interval + 1e-9).floor();
    if last < first {
        return Vec::new();
    }
    (0..=((last - first) as usize))
        .map(|step| snap_to_interval((first + step as f64) * interval, interval))
        .collect()
}

/// Decimal places needed to show multiples of `interval` exactly.
#[must_use]
pub fn interval_decimals(interval: f64) -> usize {
    if !interval.is_finite() || interval <= 0.0 {
        return 0;
    }
    let exponent = (interval.log10() + 1e-9).floor();
    if exponent >= 0.0 { 0 } else { (-exponent) as usize }
}

/// Category and value axes of one series binding.
#[derive(Debug, Clone, Copy)]
pub struct CartesianFrame<'a> {
    pub category: &'a Axis,
    pub value: &'a Axis,
    pub horizontal: bool,
}

impl CartesianFrame<'_> {
    /// Maps `(category, value)` to pixel `(x, y)`.
    pub fn point(&self, category: f64, value: f64) -> ChartResult<(f64, f64)> {
        let category_px = self.category.map(category)?;
        let value_px = self.value.map(value)?;
        Ok(if self.horizontal {
            (value_px, category_px)
        } else {
            (category_px, value_px)
        })
    }

    /// Zero clamped into the value domain, in pixels along the value axis.
    pub fn baseline_px(&self) -> ChartResult<f64> {
        let (min, max) = self.value.require_prepared()?.domain;
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.value.map(0.0_f64.clamp(low, high))
    }

    /// Pixel length of one category band.
    pub fn band_width(&self, sample_count: usize) -> ChartResult<f64> {
        let scale = self.category.scale()?;
        if self.category.is_category() {
            return Ok(scale.unit_length());
        }
        let (start, end) = scale.range();
        Ok((end - start).abs() / sample_count.max(1) as f64)
    }

    #[must_use]
    pub fn category_by_index(&self) -> bool {
        self.category.is_category()
    }
}

/// Owns every X and Y axis of a chart and their prepared scales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisManager {
    x_axes: Vec<Axis>,
    y_axes: Vec<Axis>,
    horizontal: bool,
}

impl AxisManager {
    #[must_use]
    pub fn new(x_options: &[AxisOptions], y_options: &[AxisOptions]) -> Self {
        let build = |kind: AxisKind, options: &[AxisOptions]| {
            options
                .iter()
                .enumerate()
                .map(|(id, options)| Axis::new(kind, id, options.clone()))
                .collect()
        };
        Self {
            x_axes: build(AxisKind::X, x_options),
            y_axes: build(AxisKind::Y, y_options),
            horizontal: false,
        }
    }

    /// Appends an axis and returns its id.
    pub fn add_axis(&mut self, kind: AxisKind, options: AxisOptions) -> usize {
        let axes = self.axes_mut(kind);
        let id = axes.len();
        axes.push(Axis::new(kind, id, options));
        id
    }

    /// Creates axis 0 for each kind that has none.
    pub fn ensure_default_axes(&mut self) {
        for kind in [AxisKind::X, AxisKind::Y] {
            if self.axes(kind).is_empty() {
                self.add_axis(kind, AxisOptions::default());
            }
        }
    }

    /// Switches category/value roles between X and Y axes.
    pub fn set_horizontal(&mut self, horizontal: bool) {
        self.horizontal = horizontal;
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    #[must_use]
    pub fn axes(&self, kind: AxisKind) -> &[Axis] {
        match kind {
            AxisKind::X => &self.x_axes,
            AxisKind::Y => &self.y_axes,
        }
    }

    fn axes_mut(&mut self, kind: AxisKind) -> &mut Vec<Axis> {
        match kind {
            AxisKind::X => &mut self.x_axes,
            AxisKind::Y => &mut self.y_axes,
        }
    }

    pub fn axis(&self, kind: AxisKind, id: usize) -> ChartResult<&Axis> {
        self.axes(kind).get(id).ok_or_else(|| {
            ChartError::Configuration(format!("{} axis #{id} is not defined", kind.as_str()))
        })
    }

    /// Prepares every axis against the cartesian series bound to it.
    ///
    /// Re-running with the same inputs yields the same prepared state.
    pub fn prepare(
        &mut self,
        data: &DataSet,
        series: &[&Series],
        area: ChartArea,
    ) -> ChartResult<()> {
        for item in series.iter().filter(|item| item.chart_type().is_cartesian()) {
            self.axis(AxisKind::X, item.axes.x)?;
            self.axis(AxisKind::Y, item.axes.y)?;
        }

        for kind in [AxisKind::X, AxisKind::Y] {
            for id in 0..self.axes(kind).len() {
                self.prepare_axis(kind, id, data, series, area)?;
            }
        }
        Ok(())
    }

    pub fn prepare_axis(
        &mut self,
        kind: AxisKind,
        id: usize,
        data: &DataSet,
        series: &[&Series],
        area: ChartArea,
    ) -> ChartResult<()> {
        let bound = series
            .iter()
            .copied()
            .filter(|item| item.chart_type().is_cartesian())
            .filter(|item| match kind {
                AxisKind::X => item.axes.x == id,
                AxisKind::Y => item.axes.y == id,
            })
            .collect();
        let input = AxisPreparation {
            data,
            bound,
            area,
            horizontal: self.horizontal,
        };
        let axis = self.axes_mut(kind).get_mut(id).ok_or_else(|| {
            ChartError::Configuration(format!("{} axis #{id} is not defined", kind.as_str()))
        })?;
        axis.prepare(input)
    }

    /// Category/value axis pair for a series binding.
    pub fn frame(&self, binding: AxisBinding) -> ChartResult<CartesianFrame<'_>> {
        let x = self.axis(AxisKind::X, binding.x)?;
        let y = self.axis(AxisKind::Y, binding.y)?;
        x.require_prepared()?;
        y.require_prepared()?;
        Ok(if self.horizontal {
            CartesianFrame {
                category: y,
                value: x,
                horizontal: true,
            }
        } else {
            CartesianFrame {
                category: x,
                value: y,
                horizontal: false,
            }
        })
    }
}
