use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless backend: validates each chart frame and keeps counters.
///
/// A collection hands it one frame per active slot, so `frames_rendered`
/// counts charts and `total_primitives` sums over all of them.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub total_primitives: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.total_primitives += frame.primitive_count();
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
