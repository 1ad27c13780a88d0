use crate::error::AxisResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer that validates and keeps the most recent frame.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn last_primitive_counts(&self) -> (usize, usize) {
        self.last_frame
            .as_ref()
            .map_or((0, 0), |frame| (frame.lines.len(), frame.texts.len()))
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> AxisResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
