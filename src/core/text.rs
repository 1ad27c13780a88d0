use serde::{Deserialize, Serialize};

use crate::core::types::Size;

/// Font description handed to the text measurer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "default_font_family")]
    pub family: String,
    #[serde(default = "default_point_size")]
    pub point_size: f64,
    #[serde(default)]
    pub bold: bool,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, point_size: f64) -> Self {
        Self {
            family: family.into(),
            point_size,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Pixel size of one em for the given scaling factors.
    #[must_use]
    pub fn pixel_size(&self, scaling: f64, dpi_scale: f64) -> f64 {
        self.point_size * scaling * dpi_scale
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(default_font_family(), default_point_size())
    }
}

fn default_font_family() -> String {
    "sans-serif".to_owned()
}

fn default_point_size() -> f64 {
    10.0
}

/// Text measurement service supplied by the host canvas.
///
/// Returned sizes are text-local: `width` runs along the reading direction and
/// `height` across it, whatever rotation the label is later drawn with.
/// Implementations must be deterministic and non-decreasing in `scaling`.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec, scaling: f64, dpi_scale: f64) -> Size;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &FontSpec, scaling: f64, dpi_scale: f64) -> Size {
        (**self).measure(text, font, scaling, dpi_scale)
    }
}

/// Backend-independent glyph-class estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeuristicTextMeasurer;

const LINE_HEIGHT_EM: f64 = 1.2;
const BOLD_EXTRA_EM: f64 = 0.05;

impl HeuristicTextMeasurer {
    fn glyph_units(ch: char) -> f64 {
        match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec, scaling: f64, dpi_scale: f64) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let em = font.pixel_size(scaling, dpi_scale);
        let bold_extra = if font.bold { BOLD_EXTRA_EM } else { 0.0 };

        let mut widest: f64 = 0.0;
        let mut lines = 0usize;
        for line in text.split('\n') {
            lines += 1;
            let units = line
                .chars()
                .fold(0.0, |acc, ch| acc + Self::glyph_units(ch) + bold_extra);
            widest = widest.max(units * em);
        }

        Size::new(widest, lines as f64 * em * LINE_HEIGHT_EM)
    }
}

/// Wraps `text` at spaces so each line holds at most `max_line_length` characters.
///
/// Words longer than the limit stay whole on their own line. A limit of zero
/// leaves the text unchanged.
#[must_use]
pub fn split_text_to_fit_length(text: &str, max_line_length: usize) -> String {
    if max_line_length == 0 || text.chars().count() <= max_line_length {
        return text.to_owned();
    }

    let mut wrapped = String::with_capacity(text.len());
    for (index, paragraph) in text.split('\n').enumerate() {
        if index > 0 {
            wrapped.push('\n');
        }
        let mut line_len = 0usize;
        for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > max_line_length {
                wrapped.push('\n');
                line_len = 0;
            } else if line_len > 0 {
                wrapped.push(' ');
                line_len += 1;
            }
            wrapped.push_str(word);
            line_len += word_len;
        }
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::{FontSpec, HeuristicTextMeasurer, TextMeasurer, split_text_to_fit_length};

    #[test]
    fn measurement_scales_linearly() {
        let font = FontSpec::default();
        let base = HeuristicTextMeasurer.measure("1,000", &font, 1.0, 1.0);
        let doubled = HeuristicTextMeasurer.measure("1,000", &font, 2.0, 1.0);
        assert!((doubled.width - base.width * 2.0).abs() < 1e-9);
        assert!((doubled.height - base.height * 2.0).abs() < 1e-9);
    }

    #[test]
    fn multi_line_text_stacks_lines() {
        let font = FontSpec::default();
        let one = HeuristicTextMeasurer.measure("Q1", &font, 1.0, 1.0);
        let two = HeuristicTextMeasurer.measure("Q1\nFY24", &font, 1.0, 1.0);
        assert!((two.height - one.height * 2.0).abs() < 1e-9);
        assert!(two.width > one.width);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            split_text_to_fit_length("first quarter of the year", 10),
            "first\nquarter of\nthe year"
        );
        assert_eq!(split_text_to_fit_length("short", 10), "short");
        assert_eq!(split_text_to_fit_length("unbreakableword here", 5), "unbreakableword\nhere");
    }
}
