use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Size, TextMeasurer};

use super::{Axis, LabelOrientation};

const SCALING_EPSILON: f64 = 1e-9;

/// Widest and tallest displayed label, keyed by the axis generation they were measured at.
#[derive(Debug, Default)]
pub(crate) struct LabelExtentCache {
    generation: Option<u64>,
    widest: Option<String>,
    tallest: Option<String>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelExtentCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Generation the cached extents belong to; `None` before the first lookup.
    pub generation: Option<u64>,
}

impl<M: TextMeasurer> Axis<M> {
    #[must_use]
    pub fn label_extent_cache_stats(&self) -> LabelExtentCacheStats {
        let cache = self.extent_cache.borrow();
        LabelExtentCacheStats {
            hits: cache.hits,
            misses: cache.misses,
            generation: cache.generation,
        }
    }

    /// Text of the displayed label with the largest text-local width.
    #[must_use]
    pub fn widest_label(&self) -> Option<String> {
        self.extreme_labels().0
    }

    /// Text of the displayed label with the largest text-local height.
    #[must_use]
    pub fn tallest_label(&self) -> Option<String> {
        self.extreme_labels().1
    }

    fn extreme_labels(&self) -> (Option<String>, Option<String>) {
        let mut cache = self.extent_cache.borrow_mut();
        if cache.generation == Some(self.generation) {
            cache.hits += 1;
        } else {
            cache.misses += 1;
            let mut widest: Option<(f64, String)> = None;
            let mut tallest: Option<(f64, String)> = None;
            for label in self.displayed_labels() {
                let size = self.measure_axis_label(&label.text, 1.0);
                if widest.as_ref().is_none_or(|(width, _)| size.width > *width) {
                    widest = Some((size.width, label.text.clone()));
                }
                if tallest.as_ref().is_none_or(|(height, _)| size.height > *height) {
                    tallest = Some((size.height, label.text));
                }
            }
            cache.widest = widest.map(|(_, text)| text);
            cache.tallest = tallest.map(|(_, text)| text);
            cache.generation = Some(self.generation);
            trace!(generation = self.generation, "recomputed label extents");
        }
        (cache.widest.clone(), cache.tallest.clone())
    }

    /// Size of a label along the axis line.
    pub(crate) fn along_axis_extent(&self, size: Size) -> f64 {
        match self.label_orientation {
            LabelOrientation::Parallel => size.width,
            LabelOrientation::Perpendicular => size.height,
        }
    }

    /// Size of a label across the axis line.
    pub(crate) fn across_axis_extent(&self, size: Size) -> f64 {
        match self.label_orientation {
            LabelOrientation::Parallel => size.height,
            LabelOrientation::Perpendicular => size.width,
        }
    }

    /// Labels read bottom-to-top when parallel to a vertical axis or perpendicular to a horizontal one.
    pub(crate) fn labels_rotated(&self) -> bool {
        self.is_vertical() == (self.label_orientation == LabelOrientation::Parallel)
    }

    /// Thickest displayed label across the axis, measured at the label scaling.
    pub(crate) fn label_thickness(&self) -> f64 {
        let (widest, tallest) = self.extreme_labels();
        let thickest = match self.label_orientation {
            LabelOrientation::Parallel => tallest,
            LabelOrientation::Perpendicular => widest,
        };
        thickest.map_or(0.0, |text| {
            self.across_axis_extent(self.measure_axis_label(&text, self.label_scaling))
        })
    }

    /// Label whose along-axis extent limits fitting.
    fn longest_label(&self) -> Option<String> {
        let (widest, tallest) = self.extreme_labels();
        match self.label_orientation {
            LabelOrientation::Parallel => widest,
            LabelOrientation::Perpendicular => tallest,
        }
    }

    /// Labels displayed between the ends, discounting one when both outer labels hang off the line.
    fn effective_label_count(&self) -> usize {
        let mut count = self.displayed_label_count();
        let outer_labels_hang = self.showing_outer_labels
            && self.points.len() > 2
            && self
                .points
                .first()
                .is_some_and(|point| self.is_point_displaying_label(point))
            && self
                .points
                .last()
                .is_some_and(|point| self.is_point_displaying_label(point));
        if count > 2 && outer_labels_hang {
            count -= 1;
        }
        count
    }

    fn label_budget(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            self.axis_length() / count as f64
        }
    }

    /// Pixel room along the axis for one label; doubled when labels are stacked.
    #[must_use]
    pub fn calc_max_label_width(&self) -> f64 {
        let width = self.label_budget(self.effective_label_count()) - self.scale_to_screen(2.0);
        if self.stack_labels { width * 2.0 } else { width }
    }

    /// Shrinks the label scaling in fixed steps until the longest label fits its
    /// budget, never below 1.0 and never above the current label scaling.
    pub fn calc_best_scaling_to_fit_labels(&mut self) -> f64 {
        if self.points.is_empty() {
            return self.scaling;
        }
        let budget = self.calc_max_label_width();
        if budget <= 0.0 {
            self.label_scaling = self.scaling;
            return self.scaling;
        }

        let prior = self.label_scaling;
        let Some(longest) = self.longest_label() else {
            return prior;
        };

        let step = self.style.label_scale_step;
        let mut candidate = prior;
        let mut steps = 0u32;
        while candidate > 1.0 + SCALING_EPSILON
            && self.along_axis_extent(self.measure_axis_label(&longest, candidate)) > budget
        {
            steps += 1;
            candidate = prior - step * f64::from(steps);
        }

        self.label_scaling = if prior <= 1.0 { prior } else { candidate.max(1.0) };
        if steps > 0 {
            debug!(prior, label_scaling = self.label_scaling, budget, "shrank axis labels to fit");
        }
        self.label_scaling
    }

    /// Whether labels overlap at the axis scaling and need two staggered rows.
    ///
    /// Returns the stacking flag unchanged when auto-stacking is off.
    #[must_use]
    pub fn should_labels_be_stacked_to_fit(&self) -> bool {
        if !self.auto_stacking {
            return self.stack_labels;
        }
        let measuring_height = self.label_orientation == LabelOrientation::Perpendicular;
        let padding = if measuring_height { 2.0 * self.scaling } else { 0.0 };
        let budget = self.label_budget(self.effective_label_count()) - padding;
        if budget <= 0.0 {
            return false;
        }

        let last_index = self.points.len().saturating_sub(1);
        self.points.iter().enumerate().any(|(index, point)| {
            if !self.is_point_displaying_label(point) {
                return false;
            }
            let text = self.displayable_value(point);
            let mut extent = self.along_axis_extent(self.measure_axis_label(&text, self.scaling));
            if self.showing_outer_labels && (index == 0 || index == last_index) {
                extent /= 2.0;
            }
            extent > budget
        })
    }
}
