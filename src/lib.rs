//! chart-svg: typed data series rendered into static SVG documents.
//!
//! The crate keeps a strict split between pure math and geometry (`core`),
//! backend-agnostic drawing primitives (`render`) and the chart definition
//! and render pipeline (`api`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, render_svg_batch};
pub use error::{ChartError, ChartResult};
