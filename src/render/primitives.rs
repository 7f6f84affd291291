use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

fn ensure_stroke_width(stroke_width: f64) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width < 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_paint(fill: Option<Color>, stroke: Option<Color>) -> ChartResult<()> {
    fill.map_or(Ok(()), Color::validate)?;
    stroke.map_or(Ok(()), Color::validate)
}

/// Dash pattern for stroked lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Draw command for one filled and/or stroked rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Option<Color>, stroke_width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(
            &[self.x, self.y, self.width, self.height, self.corner_radius],
            "rectangle geometry",
        )?;
        // Zero-sized rects are legal: closing timeline runs may be empty.
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rectangle size must be >= 0".to_owned(),
            ));
        }
        ensure_stroke_width(self.stroke_width)?;
        validate_paint(self.fill, self.stroke)
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One segment instruction of a path outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    fn coordinates(self) -> Vec<f64> {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => vec![x, y],
            Self::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => vec![c1x, c1y, c2x, c2y, x, y],
            Self::ArcTo { radius, x, y, .. } => vec![radius, x, y],
            Self::Close => Vec::new(),
        }
    }
}

/// Draw command for an arbitrary outline (polylines, curves, slices).
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            fill: None,
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Open polyline through `points`.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(index, (x, y))| {
                if index == 0 {
                    PathCommand::MoveTo { x: *x, y: *y }
                } else {
                    PathCommand::LineTo { x: *x, y: *y }
                }
            })
            .collect();
        Self::new(commands)
    }

    /// Closed polygon through `points`.
    #[must_use]
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let mut path = Self::polyline(points);
        if !path.commands.is_empty() {
            path.commands.push(PathCommand::Close);
        }
        path
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Option<Color>, stroke_width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !matches!(self.commands.first(), Some(PathCommand::MoveTo { .. })) {
            return Err(ChartError::InvalidData(
                "path must start with a move command".to_owned(),
            ));
        }
        for command in &self.commands {
            ensure_finite(&command.coordinates(), "path coordinates")?;
        }
        ensure_stroke_width(self.stroke_width)?;
        validate_paint(self.fill, self.stroke)
    }
}

/// Draw command for a circle (markers, scatter points, full pie slices).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn filled(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Option<Color>, stroke_width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.cx, self.cy, self.radius], "circle geometry")?;
        if self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be >= 0".to_owned(),
            ));
        }
        ensure_stroke_width(self.stroke_width)?;
        validate_paint(self.fill, self.stroke)
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    Top,
    Middle,
    Baseline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub family: String,
    pub size_px: f64,
    pub weight: String,
}

impl FontStyle {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: "normal".to_owned(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontStyle,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font: FontStyle,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            h_align,
            v_align: TextVAlign::Baseline,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y], "text coordinates")?;
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Named container keeping related primitives together (one per series).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPrimitive {
    pub class: String,
    pub children: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Path(PathPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
    Group(GroupPrimitive),
}

impl Primitive {
    #[must_use]
    pub fn group(class: impl Into<String>, children: Vec<Primitive>) -> Self {
        Self::Group(GroupPrimitive {
            class: class.into(),
            children,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Line(line) => line.validate(),
            Self::Path(path) => path.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
            Self::Group(group) => group.children.iter().try_for_each(Primitive::validate),
        }
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(value: LinePrimitive) -> Self {
        Self::Line(value)
    }
}

impl From<PathPrimitive> for Primitive {
    fn from(value: PathPrimitive) -> Self {
        Self::Path(value)
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(value: CirclePrimitive) -> Self {
        Self::Circle(value)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}
