mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use frame::{LayerPrimitives, PrimitiveCounts, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, FontStyle, GroupPrimitive, LinePrimitive, LineStrokeStyle, PathCommand,
    PathPrimitive, Primitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};
pub use svg_backend::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart data and layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
