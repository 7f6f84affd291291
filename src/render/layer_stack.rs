use serde::{Deserialize, Serialize};

/// Output layers of one render pass, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Series,
    Axis,
    Legend,
}

impl CanvasLayerKind {
    /// Paint order every frame follows.
    pub const CANONICAL_ORDER: [Self; 5] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Axis,
        Self::Legend,
    ];

    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Series => "series",
            Self::Axis => "axes",
            Self::Legend => "legend",
        }
    }
}
