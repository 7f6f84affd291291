use crate::error::ChartResult;
use crate::render::{PrimitiveCounts, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without producing a document.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_counts: PrimitiveCounts,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_counts = frame.counts();
        self.frames_rendered += 1;
        Ok(())
    }
}
