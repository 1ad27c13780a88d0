use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::TextMeasurer;

use super::Axis;

/// Side of the axis line a tick mark is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickMarkDisplay {
    /// Toward the plot area.
    Inner,
    /// Away from the plot area, on the label side.
    Outer,
    Crossed,
    NoDisplay,
}

impl TickMarkDisplay {
    #[must_use]
    pub const fn extends_outward(self) -> bool {
        matches!(self, Self::Outer | Self::Crossed)
    }

    #[must_use]
    pub const fn extends_inward(self) -> bool {
        matches!(self, Self::Inner | Self::Crossed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub value: f64,
    /// Pixel position along the axis; `None` when outside the placed range.
    pub physical_coordinate: Option<f64>,
    /// Device-independent length.
    pub line_length: f64,
    pub display: TickMarkDisplay,
}

impl TickMark {
    #[must_use]
    pub fn new(value: f64, line_length: f64, display: TickMarkDisplay) -> Self {
        Self {
            value,
            physical_coordinate: None,
            line_length,
            display,
        }
    }
}

impl<M: TextMeasurer> Axis<M> {
    /// Adds a user-owned tick mark that survives range regeneration.
    pub fn add_custom_tick_mark(&mut self, mut tick: TickMark) {
        tick.physical_coordinate = self.physical_coordinate(tick.value);
        trace!(value = tick.value, coordinate = ?tick.physical_coordinate, "add custom tick mark");
        self.custom_tick_marks.push(tick);
    }

    pub fn clear_custom_tick_marks(&mut self) {
        self.custom_tick_marks.clear();
    }

    /// Pixel reach of the tick marks on the label side of the line.
    #[must_use]
    pub fn calc_tick_mark_outer_width(&self) -> f64 {
        self.widest_tick(TickMarkDisplay::extends_outward)
    }

    /// Pixel reach of the tick marks on the plot side of the line.
    #[must_use]
    pub fn calc_tick_mark_inner_width(&self) -> f64 {
        self.widest_tick(TickMarkDisplay::extends_inward)
    }

    fn widest_tick(&self, counts: fn(TickMarkDisplay) -> bool) -> f64 {
        if self.style.tick_mark_display == TickMarkDisplay::NoDisplay {
            return 0.0;
        }
        self.tick_marks
            .iter()
            .chain(self.custom_tick_marks.iter())
            .filter(|tick| counts(tick.display))
            .map(|tick| self.scale_to_screen(tick.line_length))
            .fold(0.0, f64::max)
    }
}
