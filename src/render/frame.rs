use crate::core::Rect;
use crate::error::{AxisError, AxisResult};
use crate::render::{LinePrimitive, StrokeRole, TextPrimitive, TextRole};

/// Positioned strokes and texts for one axis draw pass.
///
/// `bounds` is the axis footprint; every primitive is expected to land inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub bounds: Rect,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn lines_with_role(&self, role: StrokeRole) -> impl Iterator<Item = &LinePrimitive> {
        self.lines.iter().filter(move |line| line.role == role)
    }

    pub fn texts_with_role(&self, role: TextRole) -> impl Iterator<Item = &TextPrimitive> {
        self.texts.iter().filter(move |text| text.role == role)
    }

    /// The label strings in emission order, which is ascending value order.
    #[must_use]
    pub fn axis_label_strings(&self) -> Vec<&str> {
        self.texts_with_role(TextRole::AxisLabel)
            .map(|text| text.text.as_str())
            .collect()
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.bounds.is_valid() {
            return Err(AxisError::InvalidData(format!(
                "axis footprint is not drawable: {:?}",
                self.bounds
            )));
        }
        self.lines.iter().try_for_each(LinePrimitive::validate)?;
        self.texts.iter().try_for_each(TextPrimitive::validate)
    }
}
