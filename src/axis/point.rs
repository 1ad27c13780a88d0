use serde::{Deserialize, Serialize};

/// One value/label/coordinate triple on the regular axis sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPoint {
    value: f64,
    display_label: String,
    shown: bool,
    physical_coordinate: Option<f64>,
}

impl AxisPoint {
    #[must_use]
    pub fn new(value: f64, display_label: impl Into<String>, shown: bool) -> Self {
        Self {
            value,
            display_label: display_label.into(),
            shown,
            physical_coordinate: None,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Pixel position along the axis; `None` before placement.
    #[must_use]
    pub fn physical_coordinate(&self) -> Option<f64> {
        self.physical_coordinate
    }

    pub(crate) fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    pub(crate) fn set_display_label(&mut self, label: String) {
        self.display_label = label;
    }

    pub(crate) fn set_physical_coordinate(&mut self, coordinate: Option<f64>) {
        self.physical_coordinate = coordinate;
    }
}

/// Logical range of an axis.
///
/// `start <= end` always holds; `reversed` only flips point order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
    pub interval: f64,
    /// Every `display_interval`-th point carries a visible label.
    pub display_interval: usize,
    pub precision: u8,
    pub reversed: bool,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            interval: 1.0,
            display_interval: 1,
            precision: 0,
            reversed: false,
        }
    }
}

impl AxisRange {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }
}
