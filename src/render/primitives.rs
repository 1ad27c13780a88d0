use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{AxisError, AxisResult};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    #[must_use]
    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    /// Channels scaled to `0.0..=1.0`, for backends that take float colors.
    #[must_use]
    pub fn to_unit_rgba(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a].map(|channel| f64::from(channel) / 255.0)
    }
}

/// What an emitted stroke belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeRole {
    AxisLine,
    TickMark,
    Bracket,
}

/// One straight stroke in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
    pub stroke_width: f64,
    pub color: Color,
    pub role: StrokeRole,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(from: Point, to: Point, stroke_width: f64, color: Color, role: StrokeRole) -> Self {
        Self {
            from,
            to,
            stroke_width,
            color,
            role,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(AxisError::InvalidData(format!(
                "{:?} stroke endpoints must be finite",
                self.role
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(AxisError::InvalidData(format!(
                "{:?} stroke width must be finite and > 0",
                self.role
            )));
        }
        Ok(())
    }
}

/// Horizontal alignment of the label's screen-space box relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical alignment of the label's screen-space box relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRole {
    AxisLabel,
    BracketCaption,
    Title,
    Header,
    Footer,
}

/// One positioned text run.
///
/// Rotated text reads bottom-to-top; alignment applies to the box after rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub anchor: Point,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub rotated: bool,
    pub role: TextRole,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, anchor: Point, font_size_px: f64, role: TextRole) -> Self {
        Self {
            text: text.into(),
            anchor,
            font_size_px,
            color: Color::BLACK,
            h_align: TextHAlign::Center,
            v_align: TextVAlign::Middle,
            rotated: false,
            role,
        }
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn rotated(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if self.text.is_empty() {
            return Err(AxisError::InvalidData(format!(
                "{:?} text must not be empty",
                self.role
            )));
        }
        if !self.anchor.is_finite() {
            return Err(AxisError::InvalidData(format!(
                "{:?} anchor must be finite: {:?}",
                self.role, self.anchor
            )));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(AxisError::InvalidData(format!(
                "{:?} font size must be finite and > 0",
                self.role
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LinePrimitive, StrokeRole, TextPrimitive, TextRole};
    use crate::core::Point;

    #[test]
    fn unit_channels_cover_the_full_range() {
        let color = Color::rgb(255, 0, 51).with_alpha(0);
        assert_eq!(color.to_unit_rgba(), [1.0, 0.0, 0.2, 0.0]);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let line = LinePrimitive::new(
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 1.0),
            1.0,
            Color::BLACK,
            StrokeRole::TickMark,
        );
        assert!(line.validate().is_err());

        let text = TextPrimitive::new("", Point::new(0.0, 0.0), 12.0, TextRole::Title);
        assert!(text.validate().is_err());
    }
}
