mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, StrokeRole, TextHAlign, TextPrimitive, TextRole, TextVAlign,
};

use crate::error::AxisResult;

/// A drawing surface for axis frames.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> AxisResult<()>;
}
