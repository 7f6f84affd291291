use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, Primitive};

/// Primitives painted into one canvas layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub primitives: Vec<Primitive>,
}

/// Primitive tallies, counting group children instead of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimitiveCounts {
    pub rects: usize,
    pub lines: usize,
    pub paths: usize,
    pub circles: usize,
    pub texts: usize,
    pub groups: usize,
}

impl PrimitiveCounts {
    fn tally(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Rect(_) => self.rects += 1,
            Primitive::Line(_) => self.lines += 1,
            Primitive::Path(_) => self.paths += 1,
            Primitive::Circle(_) => self.circles += 1,
            Primitive::Text(_) => self.texts += 1,
            Primitive::Group(group) => {
                self.groups += 1;
                for child in &group.children {
                    self.tally(child);
                }
            }
        }
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.rects + self.lines + self.paths + self.circles + self.texts
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers are created up front in [`CanvasLayerKind::CANONICAL_ORDER`], so
/// backends paint them in sequence regardless of the order producers pushed
/// primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let layers = CanvasLayerKind::CANONICAL_ORDER
            .into_iter()
            .map(|kind| LayerPrimitives {
                kind,
                primitives: Vec::new(),
            })
            .collect();
        Self { viewport, layers }
    }

    pub fn push(&mut self, kind: CanvasLayerKind, primitive: impl Into<Primitive>) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.primitives.push(primitive.into());
        }
    }

    pub fn extend<I>(&mut self, kind: CanvasLayerKind, primitives: I)
    where
        I: IntoIterator<Item = Primitive>,
    {
        if let Some(layer) = self.layer_mut(kind) {
            layer.primitives.extend(primitives);
        }
    }

    #[must_use]
    pub fn with_primitive(mut self, kind: CanvasLayerKind, primitive: impl Into<Primitive>) -> Self {
        self.push(kind, primitive);
        self
    }

    #[must_use]
    pub fn layers(&self) -> &[LayerPrimitives] {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> &[Primitive] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map_or(&[][..], |layer| layer.primitives.as_slice())
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn counts(&self) -> PrimitiveCounts {
        let mut counts = PrimitiveCounts::default();
        for primitive in self.layers.iter().flat_map(|layer| &layer.primitives) {
            counts.tally(primitive);
        }
        counts
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for layer in &self.layers {
            for primitive in &layer.primitives {
                primitive.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.primitives.is_empty())
    }
}
