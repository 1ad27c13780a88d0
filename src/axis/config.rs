use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{FontSpec, NumberLocale, WeekStart};
use crate::error::{AxisError, AxisResult};
use crate::render::Color;

use super::TickMarkDisplay;

/// Cosmetic and layout constants for one axis.
///
/// Serializable so hosts can persist axis styling next to their chart setup.
/// Lengths are device-independent and scaled at layout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStyleConfig {
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default = "default_text_color")]
    pub font_color: Color,
    #[serde(default = "default_text_color")]
    pub axis_line_color: Color,
    #[serde(default = "default_axis_line_width")]
    pub axis_line_width: f64,
    #[serde(default = "default_tick_mark_display")]
    pub tick_mark_display: TickMarkDisplay,
    #[serde(default = "default_major_tick_length")]
    pub major_tick_length: f64,
    #[serde(default = "default_minor_tick_length")]
    pub minor_tick_length: f64,
    /// Gap between the tick marks and the label block.
    #[serde(default = "default_label_spacing")]
    pub label_spacing: f64,
    /// Decrement used when shrinking labels to fit.
    #[serde(default = "default_label_scale_step")]
    pub label_scale_step: f64,
    /// chrono strftime pattern for date-axis labels.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub week_start: WeekStart,
    /// Suggested characters per line before custom labels wrap.
    #[serde(default = "default_label_line_length")]
    pub label_line_length: usize,
    #[serde(default)]
    pub number_locale: NumberLocale,
}

impl Default for AxisStyleConfig {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            font_color: default_text_color(),
            axis_line_color: default_text_color(),
            axis_line_width: default_axis_line_width(),
            tick_mark_display: default_tick_mark_display(),
            major_tick_length: default_major_tick_length(),
            minor_tick_length: default_minor_tick_length(),
            label_spacing: default_label_spacing(),
            label_scale_step: default_label_scale_step(),
            date_format: default_date_format(),
            week_start: WeekStart::default(),
            label_line_length: default_label_line_length(),
            number_locale: NumberLocale::default(),
        }
    }
}

impl AxisStyleConfig {
    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_tick_mark_display(mut self, display: TickMarkDisplay) -> Self {
        self.tick_mark_display = display;
        self
    }

    #[must_use]
    pub fn with_label_spacing(mut self, spacing: f64) -> Self {
        self.label_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_number_locale(mut self, locale: NumberLocale) -> Self {
        self.number_locale = locale;
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.font.point_size.is_finite() || self.font.point_size <= 0.0 {
            return Err(AxisError::InvalidData(
                "font point size must be finite and > 0".to_owned(),
            ));
        }
        if !self.axis_line_width.is_finite() || self.axis_line_width <= 0.0 {
            return Err(AxisError::InvalidData(
                "axis line width must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("major tick length", self.major_tick_length),
            ("minor tick length", self.minor_tick_length),
            ("label spacing", self.label_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AxisError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.label_scale_step.is_finite() || self.label_scale_step <= 0.0 {
            return Err(AxisError::InvalidData(
                "label scale step must be finite and > 0".to_owned(),
            ));
        }
        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(AxisError::InvalidData(format!(
                "date format `{}` is not a valid strftime pattern",
                self.date_format
            )));
        }
        // Time-of-day specifiers parse but cannot format a calendar date.
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::MIN.format(&self.date_format)).is_err() {
            return Err(AxisError::InvalidData(format!(
                "date format `{}` cannot format a calendar date",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AxisError::InvalidData(format!("failed to serialize axis style: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| AxisError::InvalidData(format!("failed to parse axis style: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_text_color() -> Color {
    Color::BLACK
}

fn default_axis_line_width() -> f64 {
    1.0
}

fn default_tick_mark_display() -> TickMarkDisplay {
    TickMarkDisplay::Outer
}

fn default_major_tick_length() -> f64 {
    10.0
}

fn default_minor_tick_length() -> f64 {
    5.0
}

fn default_label_spacing() -> f64 {
    4.0
}

fn default_label_scale_step() -> f64 {
    0.1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_owned()
}

fn default_label_line_length() -> usize {
    100
}
