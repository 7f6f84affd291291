use serde::{Deserialize, Serialize};

use crate::core::{Color, Margins, Viewport, default_palette};
use crate::error::{ChartError, ChartResult};
use crate::render::LineStrokeStyle;

/// Grid lines drawn behind the series at the ticks of axis 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Vertical lines at X axis ticks.
    pub show_x: bool,
    /// Horizontal lines at Y axis ticks.
    pub show_y: bool,
    pub color: Color,
    pub stroke_width: f64,
    pub stroke_style: LineStrokeStyle,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            show_x: false,
            show_y: true,
            color: Color::rgb(0xe0, 0xe0, 0xe0),
            stroke_width: 1.0,
            stroke_style: LineStrokeStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub show: bool,
    pub position: LegendPosition,
    pub font_size: f64,
    pub swatch_size: f64,
    /// Gap between consecutive entries.
    pub item_spacing: f64,
    pub color: Color,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            show: true,
            position: LegendPosition::Bottom,
            font_size: 12.0,
            swatch_size: 10.0,
            item_spacing: 16.0,
            color: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

impl LegendOptions {
    /// Returns a copy with every `Some` field of `patch` applied.
    #[must_use]
    pub fn apply(self, patch: LegendOptionsPatch) -> Self {
        Self {
            show: patch.show.unwrap_or(self.show),
            position: patch.position.unwrap_or(self.position),
            font_size: patch.font_size.unwrap_or(self.font_size),
            swatch_size: patch.swatch_size.unwrap_or(self.swatch_size),
            item_spacing: patch.item_spacing.unwrap_or(self.item_spacing),
            color: patch.color.unwrap_or(self.color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptionsPatch {
    pub show: Option<bool>,
    pub position: Option<LegendPosition>,
    pub font_size: Option<f64>,
    pub swatch_size: Option<f64>,
    pub item_spacing: Option<f64>,
    pub color: Option<Color>,
}

/// Chart-wide configuration: canvas, margins and decorations.
///
/// Every field carries a serde default, so a partial JSON object yields a
/// fully populated config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub viewport: Viewport,
    pub margins: Margins,
    pub background: Color,
    /// Fill for the chart area itself; `None` leaves it transparent.
    pub plot_background: Option<Color>,
    pub grid: GridOptions,
    pub legend: LegendOptions,
    /// Colours assigned to series without an explicit colour, by series order.
    pub palette: Vec<Color>,
    pub font_family: String,
    pub text_color: Color,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(800, 400),
            margins: Margins::default(),
            background: Color::WHITE,
            plot_background: None,
            grid: GridOptions::default(),
            legend: LegendOptions::default(),
            palette: default_palette(),
            font_family: "sans-serif".to_owned(),
            text_color: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_plot_background(mut self, plot_background: Color) -> Self {
        self.plot_background = Some(plot_background);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendOptions) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Returns a copy with every `Some` field of `patch` applied.
    #[must_use]
    pub fn apply(self, patch: ChartConfigPatch) -> Self {
        let legend = match patch.legend {
            Some(legend) => self.legend.apply(legend),
            None => self.legend,
        };
        Self {
            viewport: patch.viewport.unwrap_or(self.viewport),
            margins: patch.margins.unwrap_or(self.margins),
            background: patch.background.unwrap_or(self.background),
            plot_background: patch.plot_background.or(self.plot_background),
            grid: patch.grid.unwrap_or(self.grid),
            legend,
            palette: patch.palette.unwrap_or(self.palette),
            font_family: patch.font_family.unwrap_or(self.font_family),
            text_color: patch.text_color.unwrap_or(self.text_color),
        }
    }

    /// Palette colour for the series at `series_index`.
    #[must_use]
    pub fn palette_color(&self, series_index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[series_index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.palette.is_empty() {
            return Err(ChartError::Configuration(
                "palette must contain at least one colour".to_owned(),
            ));
        }
        if !self.grid.stroke_width.is_finite() || self.grid.stroke_width <= 0.0 {
            return Err(ChartError::Configuration(
                "grid stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.legend.font_size.is_finite() || self.legend.font_size <= 0.0 {
            return Err(ChartError::Configuration(
                "legend font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Partial chart configuration; `None` keeps the base value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfigPatch {
    pub viewport: Option<Viewport>,
    pub margins: Option<Margins>,
    pub background: Option<Color>,
    pub plot_background: Option<Color>,
    pub grid: Option<GridOptions>,
    pub legend: Option<LegendOptionsPatch>,
    pub palette: Option<Vec<Color>>,
    pub font_family: Option<String>,
    pub text_color: Option<Color>,
}
