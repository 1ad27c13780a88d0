use tracing::{debug, warn};

use crate::core::{TextMeasurer, format_axis_number, nice_range, split_text_to_fit_length};
use crate::error::{AxisError, AxisResult};

use super::{Axis, AxisPoint, AxisRange};

/// Upper bound on generated points; larger requests are rejected instead of allocated.
pub const MAX_AXIS_POINTS: usize = 100_000;

impl<M: TextMeasurer> Axis<M> {
    /// Regenerates the axis points from `start` to `end` in steps of `interval`.
    ///
    /// Every `display_interval`-th point is shown; the rest stay in place, hidden,
    /// so spacing remains uniform. `start == end` is widened by one interval on
    /// each side and a non-positive interval becomes half the span. Inverted or
    /// non-finite ranges are rejected without touching the current state.
    pub fn set_range(
        &mut self,
        start: f64,
        end: f64,
        precision: u8,
        interval: f64,
        display_interval: usize,
    ) -> AxisResult<()> {
        self.apply_range(start, end, precision, interval, display_interval)?;
        self.date_range = None;
        Ok(())
    }

    /// Like [`Axis::set_range`] with a readable interval inferred from the span.
    ///
    /// `end` grows to the next multiple of the inferred interval, plus one more
    /// interval when `include_extra_interval` is set.
    pub fn set_range_auto(
        &mut self,
        start: f64,
        end: f64,
        precision: u8,
        include_extra_interval: bool,
    ) -> AxisResult<()> {
        let start = if self.start_at_zero { start.min(0.0) } else { start };
        validate_range(start, end)?;

        let nice = nice_range(start, end, precision, include_extra_interval);
        debug!(
            start = nice.start,
            end = nice.end,
            interval = nice.interval,
            precision = nice.precision,
            "inferred axis interval"
        );
        self.set_range(nice.start, nice.end, nice.precision, nice.interval, 1)
    }

    pub(crate) fn apply_range(
        &mut self,
        start: f64,
        end: f64,
        precision: u8,
        interval: f64,
        display_interval: usize,
    ) -> AxisResult<()> {
        let mut start = if self.start_at_zero { start.min(0.0) } else { start };
        let mut end = end;
        validate_range(start, end)?;

        let requested_interval = if interval.is_finite() { interval } else { 0.0 };
        if end == start {
            let pad = if requested_interval > 0.0 { requested_interval } else { 1.0 };
            start -= pad;
            end += pad;
        }
        let interval = if requested_interval <= 0.0 {
            (end - start) / 2.0
        } else {
            requested_interval
        };
        let display_interval = display_interval.max(1);

        let last_index = step_count(end - start, interval);
        if last_index >= MAX_AXIS_POINTS {
            warn!(start, end, interval, "rejected axis range with too many points");
            return Err(AxisError::InvalidData(format!(
                "range {start}..{end} with interval {interval} exceeds {MAX_AXIS_POINTS} points"
            )));
        }

        let reversed = self.range.reversed;
        let locale = self.style.number_locale;
        self.points.clear();
        self.points.reserve(last_index + 1);
        for index in 0..=last_index {
            let offset = interval * index as f64;
            let value = if reversed { end - offset } else { start + offset };
            let shown = index % display_interval == 0;
            let label = format_axis_number(value, precision, locale);
            self.points.push(AxisPoint::new(value, label, shown));
        }

        let overshoot = interval * last_index as f64;
        let (range_start, range_end) = if reversed {
            (end - overshoot, end)
        } else {
            (start, start + overshoot)
        };
        self.range = AxisRange {
            start: range_start,
            end: range_end,
            interval,
            display_interval,
            precision,
            reversed,
        };
        self.tick_interval = interval;

        debug!(
            start = range_start,
            end = range_end,
            interval,
            display_interval,
            point_count = self.points.len(),
            "set axis range"
        );
        self.touch();
        self.refresh_placement();
        Ok(())
    }

    /// Range start and end; `start <= end` regardless of reversal.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range.start, self.range.end)
    }

    #[must_use]
    pub fn range_info(&self) -> AxisRange {
        self.range
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.range.reversed
    }

    /// Inserts one extra point at its sorted position.
    ///
    /// Returns `Ok(false)` and leaves the axis untouched when a point with that
    /// value already exists.
    pub fn add_uneven_point(&mut self, value: f64, label: &str) -> AxisResult<bool> {
        if !value.is_finite() {
            warn!(value, "rejected non-finite uneven axis point");
            return Err(AxisError::InvalidData(
                "axis point value must be finite".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|point| crate::core::values_match(point.value(), value))
        {
            debug!(value, label, "ignored uneven axis point; value already present");
            return Ok(false);
        }

        let reversed = self.range.reversed;
        let position = self.points.partition_point(|point| {
            if reversed {
                point.value() > value
            } else {
                point.value() < value
            }
        });
        let label = split_text_to_fit_length(label, self.style.label_line_length);
        self.points.insert(position, AxisPoint::new(value, label, true));

        self.touch();
        self.refresh_placement();
        Ok(true)
    }

    /// Orders points by descending value when `reverse` is set.
    pub fn reverse_scale(&mut self, reverse: bool) {
        if reverse != self.range.reversed {
            self.points.reverse();
            self.range.reversed = reverse;
            debug!(reverse, "reversed axis scale");
        }
        self.touch();
        self.refresh_placement();
    }

    /// Shows every `interval`-th point starting at index `offset`; hides the rest.
    pub fn set_display_interval(&mut self, interval: usize, offset: usize) {
        let interval = interval.max(1);
        for (index, point) in self.points.iter_mut().enumerate() {
            let shown = index >= offset && (index - offset) % interval == 0;
            point.set_shown(shown);
        }
        self.range.display_interval = interval;
        self.touch();
        self.refresh_placement();
    }

    /// Shrinks or grows the range to the extreme values of the current points.
    pub fn adjust_range_to_points(&mut self) {
        let Some(first) = self.points.first() else {
            return;
        };
        let (start, end) = self
            .points
            .iter()
            .fold((first.value(), first.value()), |(low, high), point| {
                (low.min(point.value()), high.max(point.value()))
            });
        self.range.start = start;
        self.range.end = end;
        self.refresh_placement();
    }
}

fn validate_range(start: f64, end: f64) -> AxisResult<()> {
    if !start.is_finite() || !end.is_finite() || end < start {
        warn!(start, end, "rejected invalid axis range");
        return Err(AxisError::InvalidRange { start, end });
    }
    Ok(())
}

/// Index of the last generated point: the first step reaching `span`.
fn step_count(span: f64, interval: f64) -> usize {
    let steps = span / interval;
    let nearest = steps.round();
    let count = if (steps - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
        nearest
    } else {
        steps.ceil()
    };
    if count.is_finite() && count >= 0.0 {
        // Saturating float-to-int cast; oversized counts are rejected by the caller.
        count as usize
    } else {
        usize::MAX
    }
}
