use tracing::trace;

use crate::core::{Point, Rect, TextMeasurer};
use crate::error::{AxisError, AxisResult};
use crate::render::{LinePrimitive, RenderFrame, Renderer, StrokeRole, TextPrimitive, TextRole};

use super::bounds::BandLayout;
use super::side::{AcrossAnchor, AlongAnchor, AxisLine, AxisSide, BracketGeometry, TextAnchor};
use super::{
    Axis, BracketLabelAlignment, Label, LabelOrientation, ParallelLabelAlignment,
    PerpendicularLabelAlignment, TickMarkDisplay,
};

impl<M: TextMeasurer> Axis<M> {
    /// Draws the axis through `renderer` and returns the footprint it covers.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) -> AxisResult<Rect> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)?;
        Ok(frame.bounds)
    }

    /// Builds the positioned primitives for one draw pass.
    pub fn build_render_frame(&self) -> AxisResult<RenderFrame> {
        let (Some(line), Some(bounds)) = (self.axis_line(), self.bounding_box()) else {
            return Err(AxisError::InvalidData(
                "axis must be placed before drawing".to_owned(),
            ));
        };
        let side = self.side();
        let bands = self.band_layout();

        let mut frame = RenderFrame::new(bounds);
        frame
            .lines
            .push(self.stroke(line.first, line.second, StrokeRole::AxisLine));
        self.push_tick_marks(&mut frame, side, &line);
        if self.showing_labels {
            self.push_axis_labels(&mut frame, side, &line, &bands);
        }
        self.push_brackets(&mut frame, side, &line, &bands);
        self.push_title_header_footer(&mut frame, side, &line, &bands);

        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "built axis render frame"
        );
        Ok(frame)
    }

    fn stroke(&self, from: Point, to: Point, role: StrokeRole) -> LinePrimitive {
        let width = self.scale_to_screen(self.style.axis_line_width);
        LinePrimitive::new(from, to, width, self.style.axis_line_color, role)
    }

    fn push_tick_marks(&self, frame: &mut RenderFrame, side: &dyn AxisSide, line: &AxisLine) {
        if self.style.tick_mark_display == TickMarkDisplay::NoDisplay {
            return;
        }
        for tick in self.tick_marks.iter().chain(self.custom_tick_marks.iter()) {
            let Some(coordinate) = tick.physical_coordinate else {
                continue;
            };
            let length = self.scale_to_screen(tick.line_length);
            let outward = if tick.display.extends_outward() { length } else { 0.0 };
            let inward = if tick.display.extends_inward() { length } else { 0.0 };
            if outward == 0.0 && inward == 0.0 {
                continue;
            }
            let (from, to) = side.tick_segment(line, coordinate, outward, inward);
            frame.lines.push(self.stroke(from, to, StrokeRole::TickMark));
        }
    }

    fn push_axis_labels(
        &self,
        frame: &mut RenderFrame,
        side: &dyn AxisSide,
        line: &AxisLine,
        bands: &BandLayout,
    ) {
        let font_px = self.style.font.pixel_size(self.label_scaling, self.dpi_scale);
        let rotated = self.labels_rotated();
        let along = match self.label_orientation {
            LabelOrientation::Parallel => match self.parallel_alignment {
                ParallelLabelAlignment::Centered => AlongAnchor::Centered,
                ParallelLabelAlignment::FlushLeading => AlongAnchor::Leading,
                ParallelLabelAlignment::FlushTrailing => AlongAnchor::Trailing,
            },
            LabelOrientation::Perpendicular => AlongAnchor::Centered,
        };
        let flush_with_boundary = self.label_orientation == LabelOrientation::Perpendicular
            && self.perpendicular_alignment == PerpendicularLabelAlignment::AlignWithBoundary;

        let displayed = self
            .points
            .iter()
            .filter(|point| self.is_point_displaying_label(point));
        for (row_index, point) in displayed.enumerate() {
            let Some(coordinate) = point.physical_coordinate() else {
                continue;
            };
            let text = self.displayable_value(point);
            if text.is_empty() {
                continue;
            }
            let row_offset = if self.stack_labels && row_index % 2 == 1 {
                bands.row
            } else {
                0.0
            };
            let across_at = |start: f64| {
                if flush_with_boundary {
                    AcrossAnchor::Far(start + row_offset + bands.row)
                } else {
                    AcrossAnchor::Near(start + row_offset)
                }
            };

            let mut placements = Vec::with_capacity(2);
            match bands.label_distance {
                Some(start) => placements.push(side.place_text(line, coordinate, across_at(start), along)),
                None => placements.push(side.place_text(line, coordinate, AcrossAnchor::OnLine, along)),
            }
            if let Some(start) = bands.inner_label_distance {
                placements.push(side.opposite().place_text(line, coordinate, across_at(start), along));
            }
            for anchor in placements {
                frame
                    .texts
                    .push(self.text_at(&text, anchor, font_px, TextRole::AxisLabel).rotated(rotated));
            }
        }
    }

    fn push_brackets(
        &self,
        frame: &mut RenderFrame,
        side: &dyn AxisSide,
        line: &AxisLine,
        bands: &BandLayout,
    ) {
        let band_width = self.calc_brackets_width();
        let sides = [
            (side, bands.bracket_distance),
            (side.opposite(), bands.inner_bracket_distance),
        ];
        for bracket in &self.brackets {
            let Some((start, end, caption_at)) = bracket.physical_coordinates() else {
                continue;
            };
            if !(start.is_finite() && end.is_finite() && caption_at.is_finite()) {
                continue;
            }
            let spacing = self.scale_to_screen(bracket.line_spacing);
            let font = bracket.label.font.as_ref().unwrap_or(&self.style.font);
            let font_px = font.pixel_size(self.scaling, self.dpi_scale);

            for (bracket_side, distance) in sides {
                let Some(distance) = distance else {
                    continue;
                };
                let geometry = BracketGeometry {
                    start,
                    end,
                    caption_at,
                    line_distance: distance + spacing,
                    band_distance: distance + band_width,
                    tick_length: self.scale_to_screen(bracket.tickmark_length).min(spacing),
                    shape: bracket.line_shape,
                    caption_on_line: bracket.label_alignment
                        == BracketLabelAlignment::AnchorWithLine,
                    single_line: bracket.is_single_line(),
                };
                let placement = bracket_side.place_bracket(line, &geometry);
                for (from, to) in placement.lines {
                    frame.lines.push(self.stroke(from, to, StrokeRole::Bracket));
                }
                if bracket.label.is_visible() {
                    frame
                        .texts
                        .push(self.text_at(
                            &bracket.label.text,
                            placement.caption,
                            font_px,
                            TextRole::BracketCaption,
                        ));
                }
            }
        }
    }

    fn push_title_header_footer(
        &self,
        frame: &mut RenderFrame,
        side: &dyn AxisSide,
        line: &AxisLine,
        bands: &BandLayout,
    ) {
        if let Some(distance) = bands.title_distance {
            let along = if self.is_vertical() {
                (line.first.y + line.second.y) / 2.0
            } else {
                (line.first.x + line.second.x) / 2.0
            };
            let anchor = side.place_text(line, along, AcrossAnchor::Near(distance), AlongAnchor::Centered);
            frame
                .texts
                .push(self.label_text(&self.title, anchor, TextRole::Title).rotated(self.is_vertical()));
        }

        let overhang = self.label_overhang();
        let gap = bands.gap;
        if self.header.is_visible() {
            let (along, anchor) = if self.is_vertical() {
                (line.first.y - overhang.before - gap, AlongAnchor::Trailing)
            } else {
                (line.second.x + overhang.after + gap, AlongAnchor::Leading)
            };
            let anchor = side.place_text(line, along, AcrossAnchor::OnLine, anchor);
            frame.texts.push(self.label_text(&self.header, anchor, TextRole::Header));
        }
        if self.footer.is_visible() {
            let (along, anchor) = if self.is_vertical() {
                (line.second.y + overhang.after + gap, AlongAnchor::Leading)
            } else {
                (line.first.x - overhang.before - gap, AlongAnchor::Trailing)
            };
            let anchor = side.place_text(line, along, AcrossAnchor::OnLine, anchor);
            frame.texts.push(self.label_text(&self.footer, anchor, TextRole::Footer));
        }
    }

    fn text_at(&self, text: &str, anchor: TextAnchor, font_px: f64, role: TextRole) -> TextPrimitive {
        TextPrimitive::new(text, Point::new(anchor.x, anchor.y), font_px, role)
            .aligned(anchor.h_align, anchor.v_align)
            .with_color(self.style.font_color)
    }

    fn label_text(&self, label: &Label, anchor: TextAnchor, role: TextRole) -> TextPrimitive {
        let font = label.font.as_ref().unwrap_or(&self.style.font);
        let font_px = font.pixel_size(self.scaling, self.dpi_scale);
        self.text_at(&label.text, anchor, font_px, role)
    }
}
