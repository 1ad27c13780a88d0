use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Point, Rect, TextMeasurer};
use crate::error::{AxisError, AxisResult};

use super::side::{AxisLine, AxisSide, CellLayout, SideReach, side_for};
use super::{
    Axis, DisplayedLabel, Label, LabelOrientation, ParallelLabelAlignment, PerpendicularLabelAlignment,
};

/// How far the outer labels reach past the line endpoints, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelOverhang {
    /// Past the top (vertical) or left (horizontal) endpoint.
    pub before: f64,
    /// Past the bottom (vertical) or right (horizontal) endpoint.
    pub after: f64,
}

/// Across-axis distances of every band, measured from the axis line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct BandLayout {
    pub outer_tick: f64,
    pub inner_tick: f64,
    /// Gap between bands.
    pub gap: f64,
    /// Thickness of one label row.
    pub row: f64,
    /// Where the outward label band starts; `None` when labels straddle the line.
    pub label_distance: Option<f64>,
    /// Where the mirrored label band starts for double-sided labels.
    pub inner_label_distance: Option<f64>,
    pub bracket_distance: Option<f64>,
    pub inner_bracket_distance: Option<f64>,
    pub title_distance: Option<f64>,
    pub outer_reach: f64,
    pub inner_reach: f64,
}

impl<M: TextMeasurer> Axis<M> {
    pub(crate) fn side(&self) -> &'static dyn AxisSide {
        let side = side_for(self.axis_type);
        debug_assert_eq!(side.axis_type(), self.axis_type);
        side
    }

    pub(crate) fn axis_line(&self) -> Option<AxisLine> {
        self.endpoints
            .map(|(first, second)| AxisLine { first, second })
    }

    pub(crate) fn labels_centered_on_line(&self) -> bool {
        self.label_orientation == LabelOrientation::Perpendicular
            && self.perpendicular_alignment == PerpendicularLabelAlignment::CenterOnAxisLine
    }

    pub(crate) fn band_layout(&self) -> BandLayout {
        let outer_tick = self.calc_tick_mark_outer_width();
        let inner_tick = self.calc_tick_mark_inner_width();
        let gap = self.scale_to_screen(self.style.label_spacing);
        let row = if self.showing_labels {
            self.label_thickness()
        } else {
            0.0
        };
        let block = if self.stack_labels { row * 2.0 } else { row };

        let mut layout = BandLayout {
            outer_tick,
            inner_tick,
            gap,
            row,
            outer_reach: outer_tick,
            inner_reach: inner_tick,
            ..BandLayout::default()
        };

        if block > 0.0 {
            if self.labels_centered_on_line() {
                layout.outer_reach = outer_tick.max(block / 2.0);
                layout.inner_reach = inner_tick.max(block / 2.0);
            } else {
                layout.label_distance = Some(outer_tick + gap);
                layout.outer_reach = outer_tick + gap + block;
                if self.double_sided_labels {
                    layout.inner_label_distance = Some(inner_tick + gap);
                    layout.inner_reach = inner_tick + gap + block;
                }
            }
        }

        if !self.brackets.is_empty() {
            let width = self.calc_brackets_width();
            layout.bracket_distance = Some(layout.outer_reach + gap);
            layout.outer_reach += gap + width;
            if self.double_sided_labels {
                layout.inner_bracket_distance = Some(layout.inner_reach + gap);
                layout.inner_reach += gap + width;
            }
        }

        if self.title.is_visible() {
            let thickness = self.measure_label(&self.title).height;
            layout.title_distance = Some(layout.outer_reach + gap);
            layout.outer_reach += gap + thickness;
        }
        layout
    }

    /// Full pixel footprint of the axis: line, ticks, labels, brackets, title,
    /// header and footer. `None` until the axis is placed.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        let line = self.axis_line()?;
        let bands = self.band_layout();
        let overhang = self.label_overhang();
        let (header, footer) = (self.end_label_extent(&self.header), self.end_label_extent(&self.footer));

        let (before, after) = if self.is_vertical() {
            (overhang.before + header, overhang.after + footer)
        } else {
            (overhang.before + footer, overhang.after + header)
        };

        let ceiling = if self.is_vertical() {
            self.max_width
        } else {
            self.max_height
        };
        let mut outer = bands.outer_reach;
        if let Some(limit) = ceiling.filter(|limit| outer + bands.inner_reach > *limit) {
            outer = (limit - bands.inner_reach).max(0.0);
        }

        let reach = SideReach {
            outer,
            inner: bands.inner_reach,
            before,
            after,
        };
        Some(self.side().bounding_box(&line, &reach))
    }

    /// Part of the bounding box on the outer side of the axis line.
    #[must_use]
    pub fn protruding_bounding_box(&self) -> Option<Rect> {
        let line = self.axis_line()?;
        let bounding = self.bounding_box()?;
        Some(self.side().protruding_box(bounding, &line))
    }

    /// Reach of the first and last displayed labels past the line endpoints.
    #[must_use]
    pub fn label_overhang(&self) -> LabelOverhang {
        let Some(line) = self.axis_line() else {
            return LabelOverhang::default();
        };
        if !self.showing_labels {
            return LabelOverhang::default();
        }
        let (line_start, line_end) = if self.is_vertical() {
            (line.first.y, line.second.y)
        } else {
            (line.first.x, line.second.x)
        };

        let mut outer_labels: SmallVec<[DisplayedLabel; 2]> = SmallVec::new();
        outer_labels.extend(self.first_displayed_label());
        outer_labels.extend(self.last_displayed_label());

        let alignment = match self.label_orientation {
            LabelOrientation::Parallel => self.parallel_alignment,
            LabelOrientation::Perpendicular => ParallelLabelAlignment::Centered,
        };
        let mut overhang = LabelOverhang::default();
        for label in outer_labels {
            let Some(coordinate) = self.physical_coordinate(label.value) else {
                continue;
            };
            let extent =
                self.along_axis_extent(self.measure_axis_label(&label.text, self.label_scaling));
            let (low, high) = match alignment {
                ParallelLabelAlignment::Centered => {
                    (coordinate - extent / 2.0, coordinate + extent / 2.0)
                }
                ParallelLabelAlignment::FlushLeading => (coordinate, coordinate + extent),
                ParallelLabelAlignment::FlushTrailing => (coordinate - extent, coordinate),
            };
            overhang.before = overhang.before.max(line_start - low);
            overhang.after = overhang.after.max(high - line_end);
        }
        overhang
    }

    /// Along-axis room taken by a header or footer, including its gap.
    fn end_label_extent(&self, label: &Label) -> f64 {
        if !label.is_visible() {
            return 0.0;
        }
        let size = self.measure_label(label);
        let extent = if self.is_vertical() {
            size.height
        } else {
            size.width
        };
        extent + self.scale_to_screen(self.style.label_spacing)
    }

    /// Fits the axis into a fixed layout cell.
    ///
    /// Derives the endpoints from `rect` and the anchoring, reserving room for
    /// the header, footer and outer labels, then caps later bounding boxes at
    /// the cell's width (vertical) or height (horizontal).
    pub fn set_bounding_box(&mut self, rect: Rect, scaling: f64) -> AxisResult<()> {
        debug_assert!(
            !self.free_floating,
            "free-floating axes are placed with set_points, not a layout cell"
        );
        if self.free_floating {
            warn!("ignored layout cell for a free-floating axis");
            return Ok(());
        }
        if !rect.is_valid() {
            return Err(AxisError::InvalidData(format!(
                "axis layout cell must be finite and non-negative: {rect:?}"
            )));
        }
        self.set_scaling(scaling)?;

        if self.endpoints.is_none() {
            let provisional = if self.is_vertical() {
                Point::new(rect.left(), rect.bottom())
            } else {
                Point::new(rect.right(), rect.top())
            };
            self.set_points(rect.top_left(), provisional)?;
        }

        let (Some(bounding), Some(protruding)) =
            (self.bounding_box(), self.protruding_bounding_box())
        else {
            return Ok(());
        };
        let overhang = self.label_overhang();
        let header = self.end_label_extent(&self.header);
        let footer = self.end_label_extent(&self.footer);
        let (header_padding, footer_padding) = if self.is_vertical() {
            (overhang.before + header, overhang.after + footer)
        } else {
            (overhang.after + header, overhang.before + footer)
        };

        let layout = CellLayout {
            cell: rect,
            bounding,
            protruding,
            anchoring: self.anchoring,
            header_padding,
            footer_padding,
        };
        let (first, second) = self.side().endpoints_in_cell(&layout);
        self.set_points(first, second)?;

        if self.is_horizontal() {
            self.max_height = Some(rect.height);
        } else {
            self.max_width = Some(rect.width);
        }
        debug!(?rect, ?first, ?second, "fit axis into layout cell");
        Ok(())
    }
}
