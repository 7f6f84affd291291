use tracing::debug;

use crate::error::ChartResult;

use super::Chart;

/// Renders independent charts to SVG, one result per chart in input order.
///
/// Passes share no state, so with the `parallel-render` feature they run on
/// the rayon pool; otherwise they run one after another.
#[must_use]
pub fn render_svg_batch(charts: &[Chart]) -> Vec<ChartResult<String>> {
    debug!(charts = charts.len(), "rendering chart batch");

    #[cfg(feature = "parallel-render")]
    {
        use rayon::prelude::*;

        return charts.par_iter().map(Chart::render_svg).collect();
    }

    #[cfg(not(feature = "parallel-render"))]
    {
        charts.iter().map(Chart::render_svg).collect()
    }
}
