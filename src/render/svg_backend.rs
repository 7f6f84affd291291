use tracing::debug;

use crate::core::Color;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, PathCommand, PathPrimitive, Primitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

/// Renderer that serializes frames into standalone SVG documents.
///
/// Each non-empty layer becomes a `<g class="layer-…">` element in paint
/// order. Coordinates are written with at most two decimals, so equal frames
/// always produce byte-identical documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the last successful `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let width = frame.viewport.width;
        let height = frame.viewport.height;
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n",
        ));
        for layer in frame.layers() {
            if layer.primitives.is_empty() {
                continue;
            }
            svg.push_str(&format!(
                "<g class=\"layer-{}\">\n",
                layer.kind.class_name()
            ));
            for primitive in &layer.primitives {
                write_primitive(&mut svg, primitive);
            }
            svg.push_str("</g>\n");
        }
        svg.push_str("</svg>\n");

        debug!(bytes = svg.len(), "svg document rendered");
        self.document = svg;
        Ok(())
    }
}

fn write_primitive(svg: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Rect(rect) => write_rect(svg, rect),
        Primitive::Line(line) => write_line(svg, line),
        Primitive::Path(path) => write_path(svg, path),
        Primitive::Circle(circle) => write_circle(svg, circle),
        Primitive::Text(text) => write_text(svg, text),
        Primitive::Group(group) => {
            svg.push_str(&format!("<g class=\"{}\">\n", escape_xml(&group.class)));
            for child in &group.children {
                write_primitive(svg, child);
            }
            svg.push_str("</g>\n");
        }
    }
}

fn write_rect(svg: &mut String, rect: &RectPrimitive) {
    let corner = if rect.corner_radius > 0.0 {
        let radius = fmt_num(rect.corner_radius);
        format!(" rx=\"{radius}\" ry=\"{radius}\"")
    } else {
        String::new()
    };
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{corner}{}{}/>\n",
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
        paint("fill", rect.fill),
        stroke(rect.stroke, rect.stroke_width),
    ));
}

fn write_line(svg: &mut String, line: &LinePrimitive) {
    let dash = match line.stroke_style {
        LineStrokeStyle::Solid => "",
        LineStrokeStyle::Dashed => " stroke-dasharray=\"6 4\"",
        LineStrokeStyle::Dotted => " stroke-dasharray=\"2 3\"",
    };
    svg.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}{dash}/>\n",
        fmt_num(line.x1),
        fmt_num(line.y1),
        fmt_num(line.x2),
        fmt_num(line.y2),
        stroke(Some(line.color), line.stroke_width),
    ));
}

fn write_path(svg: &mut String, path: &PathPrimitive) {
    let d = path
        .commands
        .iter()
        .map(|command| path_segment(*command))
        .collect::<Vec<_>>()
        .join(" ");
    let join = if path.stroke.is_some() {
        " stroke-linejoin=\"round\""
    } else {
        ""
    };
    svg.push_str(&format!(
        "<path d=\"{d}\"{}{}{join}/>\n",
        paint("fill", path.fill),
        stroke(path.stroke, path.stroke_width),
    ));
}

fn path_segment(command: PathCommand) -> String {
    match command {
        PathCommand::MoveTo { x, y } => format!("M{} {}", fmt_num(x), fmt_num(y)),
        PathCommand::LineTo { x, y } => format!("L{} {}", fmt_num(x), fmt_num(y)),
        PathCommand::CubicTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        } => format!(
            "C{} {} {} {} {} {}",
            fmt_num(c1x),
            fmt_num(c1y),
            fmt_num(c2x),
            fmt_num(c2y),
            fmt_num(x),
            fmt_num(y)
        ),
        PathCommand::ArcTo {
            radius,
            large_arc,
            sweep,
            x,
            y,
        } => {
            let radius = fmt_num(radius);
            format!(
                "A{radius} {radius} 0 {} {} {} {}",
                u8::from(large_arc),
                u8::from(sweep),
                fmt_num(x),
                fmt_num(y)
            )
        }
        PathCommand::Close => "Z".to_owned(),
    }
}

fn write_circle(svg: &mut String, circle: &CirclePrimitive) {
    svg.push_str(&format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}{}/>\n",
        fmt_num(circle.cx),
        fmt_num(circle.cy),
        fmt_num(circle.radius),
        paint("fill", circle.fill),
        stroke(circle.stroke, circle.stroke_width),
    ));
}

fn write_text(svg: &mut String, text: &TextPrimitive) {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let baseline = match text.v_align {
        TextVAlign::Top => " dominant-baseline=\"hanging\"",
        TextVAlign::Middle => " dominant-baseline=\"middle\"",
        TextVAlign::Baseline => "",
    };
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\"{} text-anchor=\"{anchor}\"{baseline}>{}</text>\n",
        fmt_num(text.x),
        fmt_num(text.y),
        escape_xml(&text.font.family),
        fmt_num(text.font.size_px),
        escape_xml(&text.font.weight),
        paint("fill", Some(text.color)),
        escape_xml(&text.text),
    ));
}

fn paint(attribute: &str, color: Option<Color>) -> String {
    match color {
        None => format!(" {attribute}=\"none\""),
        Some(color) if color.is_opaque() => format!(" {attribute}=\"{}\"", color.to_hex()),
        Some(color) => format!(
            " {attribute}=\"{}\" {attribute}-opacity=\"{}\"",
            color.with_alpha(1.0).to_hex(),
            fmt_num(color.alpha)
        ),
    }
}

fn stroke(color: Option<Color>, width: f64) -> String {
    match color {
        Some(color) if width > 0.0 => format!(
            "{} stroke-width=\"{}\"",
            paint("stroke", Some(color)),
            fmt_num(width)
        ),
        _ => String::new(),
    }
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub(crate) fn fmt_num(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
