use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{FontSpec, Size, TextMeasurer, split_text_to_fit_length};

use super::{Axis, AxisPoint};

/// Rich text attached to an axis: custom point labels, titles, headers, footers
/// and bracket captions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Overrides the axis font when set.
    #[serde(default)]
    pub font: Option<FontSpec>,
    #[serde(default = "default_shown")]
    pub shown: bool,
}

fn default_shown() -> bool {
    true
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            shown: true,
        }
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.shown = false;
        self
    }

    /// Shown and carrying text.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown && !self.text.is_empty()
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// How regular values and custom labels combine into the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelDisplay {
    /// Custom label where one exists, otherwise the formatted value.
    #[default]
    CustomLabelsOrValues,
    CustomLabelsOnly,
    ValuesOnly,
    /// `custom (value)`.
    CustomLabelsAndValues,
    NoDisplay,
}

/// A point whose label is visible, with the text that would be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedLabel {
    pub value: f64,
    pub text: String,
}

impl<M: TextMeasurer> Axis<M> {
    /// Attaches a custom label to `value`, replacing any existing one.
    pub fn set_custom_label(&mut self, value: f64, label: impl Into<Label>) {
        let mut label = label.into();
        label.text = split_text_to_fit_length(&label.text, self.style.label_line_length);
        trace!(value, text = %label.text, "set custom label");
        self.custom_labels.insert(OrderedFloat(value), label);
        self.touch();
    }

    #[must_use]
    pub fn custom_label(&self, value: f64) -> Option<&Label> {
        self.custom_labels.get(&OrderedFloat(value))
    }

    pub fn clear_custom_labels(&mut self) {
        self.custom_labels.clear();
        self.touch();
    }

    /// Custom labels in ascending value order.
    pub fn custom_labels(&self) -> impl Iterator<Item = (f64, &Label)> {
        self.custom_labels.iter().map(|(value, label)| (value.0, label))
    }

    #[must_use]
    pub fn label_line_length(&self) -> usize {
        self.style.label_line_length
    }

    /// Changes the wrap length and re-wraps existing custom and point labels.
    pub fn set_label_line_length(&mut self, max_line_length: usize) {
        self.style.label_line_length = max_line_length;
        for label in self.custom_labels.values_mut() {
            label.text = split_text_to_fit_length(&label.text.replace('\n', " "), max_line_length);
        }
        for point in &mut self.points {
            let rewrapped =
                split_text_to_fit_length(&point.display_label().replace('\n', " "), max_line_length);
            point.set_display_label(rewrapped);
        }
        self.touch();
    }

    /// A point is labeled when a shown regular label or a custom one exists for its value.
    #[must_use]
    pub fn point_has_label(&self, value: f64) -> bool {
        self.points
            .iter()
            .any(|point| point.is_shown() && crate::core::values_match(point.value(), value))
            || self.custom_labels.contains_key(&OrderedFloat(value))
    }

    #[must_use]
    pub fn is_point_displaying_label(&self, point: &AxisPoint) -> bool {
        if !point.is_shown() || !self.showing_labels {
            return false;
        }
        let custom_text = self
            .custom_label(point.value())
            .filter(|label| label.shown && !label.text.is_empty())
            .is_some();
        let has_value = !point.display_label().is_empty();
        match self.label_display {
            LabelDisplay::NoDisplay => false,
            LabelDisplay::CustomLabelsOnly => custom_text,
            LabelDisplay::ValuesOnly => has_value,
            LabelDisplay::CustomLabelsOrValues | LabelDisplay::CustomLabelsAndValues => {
                custom_text || has_value
            }
        }
    }

    /// Text drawn for `point` under the current display mode; empty when nothing shows.
    #[must_use]
    pub fn displayable_value(&self, point: &AxisPoint) -> String {
        if !self.showing_labels {
            return String::new();
        }
        let custom = self
            .custom_label(point.value())
            .filter(|label| label.shown && !label.text.is_empty())
            .map(|label| label.text.as_str());
        let value = point.display_label();

        match self.label_display {
            LabelDisplay::NoDisplay => String::new(),
            LabelDisplay::ValuesOnly => value.to_owned(),
            LabelDisplay::CustomLabelsOnly => custom.unwrap_or_default().to_owned(),
            LabelDisplay::CustomLabelsOrValues => custom.unwrap_or(value).to_owned(),
            LabelDisplay::CustomLabelsAndValues => match custom {
                Some(custom) if !value.is_empty() => format!("{custom} ({value})"),
                Some(custom) => custom.to_owned(),
                None => value.to_owned(),
            },
        }
    }

    /// Every point that currently displays a label, in point order.
    #[must_use]
    pub fn displayed_labels(&self) -> Vec<DisplayedLabel> {
        self.points
            .iter()
            .filter(|point| self.is_point_displaying_label(point))
            .map(|point| DisplayedLabel {
                value: point.value(),
                text: self.displayable_value(point),
            })
            .collect()
    }

    #[must_use]
    pub fn first_displayed_label(&self) -> Option<DisplayedLabel> {
        self.points
            .iter()
            .find(|point| self.is_point_displaying_label(point))
            .map(|point| DisplayedLabel {
                value: point.value(),
                text: self.displayable_value(point),
            })
    }

    #[must_use]
    pub fn last_displayed_label(&self) -> Option<DisplayedLabel> {
        self.points
            .iter()
            .rev()
            .find(|point| self.is_point_displaying_label(point))
            .map(|point| DisplayedLabel {
                value: point.value(),
                text: self.displayable_value(point),
            })
    }

    pub(crate) fn displayed_label_count(&self) -> usize {
        self.points
            .iter()
            .filter(|point| self.is_point_displaying_label(point))
            .count()
    }

    /// Text-local size of an axis label at `scaling`.
    pub(crate) fn measure_axis_label(&self, text: &str, scaling: f64) -> Size {
        self.measurer
            .measure(text, &self.style.font, scaling, self.dpi_scale)
    }

    /// Text-local size of a free-standing label (title, bracket caption) at the axis scaling.
    pub(crate) fn measure_label(&self, label: &Label) -> Size {
        let font = label.font.as_ref().unwrap_or(&self.style.font);
        self.measurer
            .measure(&label.text, font, self.scaling, self.dpi_scale)
    }
}
