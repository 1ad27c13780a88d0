use tracing::{debug, trace, warn};

use crate::core::{Point, TextMeasurer};
use crate::error::{AxisError, AxisResult};

use super::range::MAX_AXIS_POINTS;
use super::{Axis, TickMark};

impl<M: TextMeasurer> Axis<M> {
    /// Places the axis between two pixel points and refits the labels.
    ///
    /// Endpoints are reordered so the top point (vertical) or the left point
    /// (horizontal) comes first. Returns the fitted label scaling.
    pub fn set_points(&mut self, p1: Point, p2: Point) -> AxisResult<f64> {
        if !p1.is_finite() || !p2.is_finite() {
            warn!(?p1, ?p2, "rejected non-finite axis endpoints");
            return Err(AxisError::InvalidData(
                "axis endpoints must be finite".to_owned(),
            ));
        }
        let ordered = if self.is_vertical() {
            if p1.y <= p2.y { (p1, p2) } else { (p2, p1) }
        } else if p1.x <= p2.x {
            (p1, p2)
        } else {
            (p2, p1)
        };
        self.endpoints = Some(ordered);
        self.place();

        let label_scaling = self.calc_best_scaling_to_fit_labels();
        debug!(
            first = ?ordered.0,
            second = ?ordered.1,
            label_offset = self.label_offset,
            label_scaling,
            "placed axis"
        );
        Ok(label_scaling)
    }

    /// Pixel length of the placed axis line; 0 before placement.
    #[must_use]
    pub fn axis_length(&self) -> f64 {
        match self.endpoints {
            Some((first, second)) if self.is_vertical() => (second.y - first.y).abs(),
            Some((first, second)) => (second.x - first.x).abs(),
            None => 0.0,
        }
    }

    /// Recomputes positions after a structural change, if the axis is placed.
    pub(crate) fn refresh_placement(&mut self) {
        if self.endpoints.is_some() {
            self.place();
        }
    }

    fn place(&mut self) {
        self.calc_label_positions();
        self.calc_tick_mark_positions();
    }

    /// Spreads points evenly: bottom-to-top on vertical axes, left-to-right on horizontal ones.
    fn calc_label_positions(&mut self) {
        let Some((first, second)) = self.endpoints else {
            return;
        };
        let count = self.points.len();
        self.label_offset = if count > 1 {
            self.axis_length() / (count - 1) as f64
        } else {
            0.0
        };

        let vertical = self.is_vertical();
        let offset = self.label_offset;
        for (index, point) in self.points.iter_mut().enumerate() {
            let step = offset * index as f64;
            let coordinate = if vertical {
                second.y - step
            } else {
                first.x + step
            };
            point.set_physical_coordinate(Some(coordinate));
        }
    }

    fn calc_tick_mark_positions(&mut self) {
        self.tick_marks.clear();
        let interval = self.tick_interval;
        let (start, end) = (self.range.start, self.range.end);

        if interval > 0.0 && end >= start && !self.points.is_empty() {
            let steps = ((end - start) / interval + 1e-9).floor();
            if steps.is_finite() && steps < MAX_AXIS_POINTS as f64 {
                let display = self.style.tick_mark_display;
                // Bounded by MAX_AXIS_POINTS above.
                let steps = steps as usize;
                let mut ticks = Vec::with_capacity(steps + 1);
                for index in 0..=steps {
                    let value = start + interval * index as f64;
                    let length = if self.point_has_label(value) {
                        self.style.major_tick_length
                    } else {
                        self.style.minor_tick_length
                    };
                    let mut tick = TickMark::new(value, length, display);
                    tick.physical_coordinate = self.physical_coordinate(value);
                    ticks.push(tick);
                }
                self.tick_marks = ticks;
            } else {
                warn!(start, end, interval, "skipped tick marks; too many for the range");
            }
        }

        let mut custom = std::mem::take(&mut self.custom_tick_marks);
        for tick in &mut custom {
            tick.physical_coordinate = self.physical_coordinate(tick.value);
        }
        self.custom_tick_marks = custom;
        self.resolve_brackets();

        trace!(
            regular = self.tick_marks.len(),
            custom = self.custom_tick_marks.len(),
            "placed tick marks"
        );
    }
}
