//! Per-side geometry.
//!
//! Every axis side owns its sign conventions: which way "outward" points, which
//! text edge faces the line and how a layout cell turns into endpoints. The
//! layout code asks the side instead of branching on [`AxisType`].

use smallvec::SmallVec;

use crate::core::{Anchoring, Point, Rect};
use crate::render::{TextHAlign, TextVAlign};

use super::{AxisType, BracketLineShape};

/// Placed axis line, top/left endpoint first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisLine {
    pub first: Point,
    pub second: Point,
}

/// Pixel reach of the axis footprint around its line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct SideReach {
    /// Away from the plot area.
    pub outer: f64,
    /// Into the plot area.
    pub inner: f64,
    /// Past the top (vertical) or left (horizontal) endpoint.
    pub before: f64,
    /// Past the bottom (vertical) or right (horizontal) endpoint.
    pub after: f64,
}

/// Across-axis placement of a text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AcrossAnchor {
    /// Box edge facing the line sits `distance` px outward.
    Near(f64),
    /// Box edge facing away from the line sits `distance` px outward.
    Far(f64),
    /// Box centered on the line.
    OnLine,
}

/// Along-axis placement of a text box relative to its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlongAnchor {
    Centered,
    /// Top/left edge on the coordinate.
    Leading,
    /// Bottom/right edge on the coordinate.
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TextAnchor {
    pub x: f64,
    pub y: f64,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

/// Pixel geometry of one bracket band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BracketGeometry {
    pub start: f64,
    pub end: f64,
    pub caption_at: f64,
    /// Distance from the axis line to the bracket line.
    pub line_distance: f64,
    /// Distance from the axis line to the outer edge of the band.
    pub band_distance: f64,
    pub tick_length: f64,
    pub shape: BracketLineShape,
    pub caption_on_line: bool,
    pub single_line: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BracketPlacement {
    pub lines: SmallVec<[(Point, Point); 6]>,
    pub caption: TextAnchor,
}

/// Inputs for deriving endpoints from a fixed layout cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CellLayout {
    pub cell: Rect,
    pub bounding: Rect,
    pub protruding: Rect,
    pub anchoring: Anchoring,
    /// Reserved at the top (vertical) or right (horizontal) end.
    pub header_padding: f64,
    /// Reserved at the bottom (vertical) or left (horizontal) end.
    pub footer_padding: f64,
}

pub(crate) trait AxisSide: Sync {
    fn axis_type(&self) -> AxisType;

    /// Side that mirrors this one across the line; used for double-sided labels.
    fn opposite(&self) -> &'static dyn AxisSide;

    /// Point `distance` px outward from the line at along-axis `along`.
    fn point_at(&self, line: &AxisLine, along: f64, distance: f64) -> Point;

    fn bounding_box(&self, line: &AxisLine, reach: &SideReach) -> Rect;

    /// Portion of `bounding` lying on the outer side of the line.
    fn protruding_box(&self, bounding: Rect, line: &AxisLine) -> Rect;

    fn place_text(
        &self,
        line: &AxisLine,
        along: f64,
        across: AcrossAnchor,
        along_anchor: AlongAnchor,
    ) -> TextAnchor;

    fn endpoints_in_cell(&self, layout: &CellLayout) -> (Point, Point);

    /// Tick segment reaching `outward` px away from the plot and `inward` px into it.
    fn tick_segment(&self, line: &AxisLine, along: f64, outward: f64, inward: f64) -> (Point, Point) {
        (
            self.point_at(line, along, outward),
            self.point_at(line, along, -inward),
        )
    }

    fn place_bracket(&self, line: &AxisLine, geometry: &BracketGeometry) -> BracketPlacement {
        let mut lines = SmallVec::new();
        let distance = geometry.line_distance;
        let start = self.point_at(line, geometry.start, distance);
        let end = self.point_at(line, geometry.end, distance);
        let direction = if geometry.end >= geometry.start { 1.0 } else { -1.0 };
        match geometry.shape {
            BracketLineShape::NoLine => {}
            _ if geometry.single_line => {
                let tick_end = distance - geometry.tick_length;
                lines.push((start, self.point_at(line, geometry.start, tick_end)));
            }
            BracketLineShape::Lines => {
                let tick_end = distance - geometry.tick_length;
                lines.push((start, end));
                lines.push((start, self.point_at(line, geometry.start, tick_end)));
                lines.push((end, self.point_at(line, geometry.end, tick_end)));
            }
            BracketLineShape::Arrow => {
                let head = geometry.tick_length;
                lines.push((start, end));
                for (tip, inward) in [(geometry.start, direction), (geometry.end, -direction)] {
                    let tip_point = self.point_at(line, tip, distance);
                    let back = tip + inward * head;
                    lines.push((tip_point, self.point_at(line, back, distance - head / 2.0)));
                    lines.push((tip_point, self.point_at(line, back, distance + head / 2.0)));
                }
            }
        }

        let across = if geometry.caption_on_line {
            AcrossAnchor::Near(distance)
        } else {
            AcrossAnchor::Far(geometry.band_distance)
        };
        let caption = self.place_text(line, geometry.caption_at, across, AlongAnchor::Centered);
        BracketPlacement { lines, caption }
    }
}

#[must_use]
pub(crate) fn side_for(axis_type: AxisType) -> &'static dyn AxisSide {
    match axis_type {
        AxisType::LeftY => &LeftSide,
        AxisType::RightY => &RightSide,
        AxisType::TopX => &TopSide,
        AxisType::BottomX => &BottomSide,
    }
}

fn vertical_along(anchor: AlongAnchor) -> TextVAlign {
    match anchor {
        AlongAnchor::Centered => TextVAlign::Middle,
        AlongAnchor::Leading => TextVAlign::Top,
        AlongAnchor::Trailing => TextVAlign::Bottom,
    }
}

fn horizontal_along(anchor: AlongAnchor) -> TextHAlign {
    match anchor {
        AlongAnchor::Centered => TextHAlign::Center,
        AlongAnchor::Leading => TextHAlign::Left,
        AlongAnchor::Trailing => TextHAlign::Right,
    }
}

pub(crate) struct LeftSide;
pub(crate) struct RightSide;
pub(crate) struct TopSide;
pub(crate) struct BottomSide;

impl AxisSide for LeftSide {
    fn axis_type(&self) -> AxisType {
        AxisType::LeftY
    }

    fn opposite(&self) -> &'static dyn AxisSide {
        &RightSide
    }

    fn point_at(&self, line: &AxisLine, along: f64, distance: f64) -> Point {
        Point::new(line.first.x - distance, along)
    }

    fn bounding_box(&self, line: &AxisLine, reach: &SideReach) -> Rect {
        Rect::from_edges(
            line.first.x - reach.outer,
            line.first.y - reach.before,
            line.first.x + reach.inner,
            line.second.y + reach.after,
        )
    }

    fn protruding_box(&self, bounding: Rect, line: &AxisLine) -> Rect {
        Rect::from_edges(
            bounding.left(),
            bounding.top(),
            line.first.x.max(bounding.left()),
            bounding.bottom(),
        )
    }

    fn place_text(
        &self,
        line: &AxisLine,
        along: f64,
        across: AcrossAnchor,
        along_anchor: AlongAnchor,
    ) -> TextAnchor {
        let (x, h_align) = match across {
            AcrossAnchor::Near(distance) => (line.first.x - distance, TextHAlign::Right),
            AcrossAnchor::Far(distance) => (line.first.x - distance, TextHAlign::Left),
            AcrossAnchor::OnLine => (line.first.x, TextHAlign::Center),
        };
        TextAnchor {
            x,
            y: along,
            h_align,
            v_align: vertical_along(along_anchor),
        }
    }

    fn endpoints_in_cell(&self, layout: &CellLayout) -> (Point, Point) {
        let cell = layout.cell;
        let x = match layout.anchoring {
            Anchoring::TopLeftCorner | Anchoring::BottomLeftCorner => {
                cell.left() + layout.protruding.width
            }
            Anchoring::Center => cell.left() + cell.width / 2.0,
            Anchoring::TopRightCorner | Anchoring::BottomRightCorner => {
                cell.left() + (cell.width - (layout.bounding.width - layout.protruding.width))
            }
        };
        (
            Point::new(x, cell.top() + layout.header_padding),
            Point::new(x, cell.bottom() - layout.footer_padding),
        )
    }
}

impl AxisSide for RightSide {
    fn axis_type(&self) -> AxisType {
        AxisType::RightY
    }

    fn opposite(&self) -> &'static dyn AxisSide {
        &LeftSide
    }

    fn point_at(&self, line: &AxisLine, along: f64, distance: f64) -> Point {
        Point::new(line.first.x + distance, along)
    }

    fn bounding_box(&self, line: &AxisLine, reach: &SideReach) -> Rect {
        Rect::from_edges(
            line.first.x - reach.inner,
            line.first.y - reach.before,
            line.first.x + reach.outer,
            line.second.y + reach.after,
        )
    }

    fn protruding_box(&self, bounding: Rect, line: &AxisLine) -> Rect {
        Rect::from_edges(
            line.first.x.min(bounding.right()),
            bounding.top(),
            bounding.right(),
            bounding.bottom(),
        )
    }

    fn place_text(
        &self,
        line: &AxisLine,
        along: f64,
        across: AcrossAnchor,
        along_anchor: AlongAnchor,
    ) -> TextAnchor {
        let (x, h_align) = match across {
            AcrossAnchor::Near(distance) => (line.first.x + distance, TextHAlign::Left),
            AcrossAnchor::Far(distance) => (line.first.x + distance, TextHAlign::Right),
            AcrossAnchor::OnLine => (line.first.x, TextHAlign::Center),
        };
        TextAnchor {
            x,
            y: along,
            h_align,
            v_align: vertical_along(along_anchor),
        }
    }

    fn endpoints_in_cell(&self, layout: &CellLayout) -> (Point, Point) {
        let cell = layout.cell;
        let x = match layout.anchoring {
            Anchoring::TopLeftCorner | Anchoring::BottomLeftCorner => {
                cell.left() + (layout.bounding.width - layout.protruding.width)
            }
            Anchoring::Center => cell.left() + cell.width / 2.0,
            Anchoring::TopRightCorner | Anchoring::BottomRightCorner => {
                cell.left() + (cell.width - layout.protruding.width)
            }
        };
        (
            Point::new(x, cell.top() + layout.header_padding),
            Point::new(x, cell.bottom() - layout.footer_padding),
        )
    }
}

impl AxisSide for TopSide {
    fn axis_type(&self) -> AxisType {
        AxisType::TopX
    }

    fn opposite(&self) -> &'static dyn AxisSide {
        &BottomSide
    }

    fn point_at(&self, line: &AxisLine, along: f64, distance: f64) -> Point {
        Point::new(along, line.first.y - distance)
    }

    fn bounding_box(&self, line: &AxisLine, reach: &SideReach) -> Rect {
        Rect::from_edges(
            line.first.x - reach.before,
            line.first.y - reach.outer,
            line.second.x + reach.after,
            line.first.y + reach.inner,
        )
    }

    fn protruding_box(&self, bounding: Rect, line: &AxisLine) -> Rect {
        Rect::from_edges(
            bounding.left(),
            bounding.top(),
            bounding.right(),
            line.first.y.max(bounding.top()),
        )
    }

    fn place_text(
        &self,
        line: &AxisLine,
        along: f64,
        across: AcrossAnchor,
        along_anchor: AlongAnchor,
    ) -> TextAnchor {
        let (y, v_align) = match across {
            AcrossAnchor::Near(distance) => (line.first.y - distance, TextVAlign::Bottom),
            AcrossAnchor::Far(distance) => (line.first.y - distance, TextVAlign::Top),
            AcrossAnchor::OnLine => (line.first.y, TextVAlign::Middle),
        };
        TextAnchor {
            x: along,
            y,
            h_align: horizontal_along(along_anchor),
            v_align,
        }
    }

    fn endpoints_in_cell(&self, layout: &CellLayout) -> (Point, Point) {
        let cell = layout.cell;
        let y = match layout.anchoring {
            Anchoring::TopLeftCorner | Anchoring::BottomLeftCorner => {
                cell.top() + layout.protruding.height
            }
            Anchoring::Center => cell.top() + cell.height / 2.0,
            Anchoring::TopRightCorner | Anchoring::BottomRightCorner => {
                cell.bottom() - (layout.bounding.height - layout.protruding.height)
            }
        };
        (
            Point::new(cell.left() + layout.footer_padding, y),
            Point::new(cell.right() - layout.header_padding, y),
        )
    }
}

impl AxisSide for BottomSide {
    fn axis_type(&self) -> AxisType {
        AxisType::BottomX
    }

    fn opposite(&self) -> &'static dyn AxisSide {
        &TopSide
    }

    fn point_at(&self, line: &AxisLine, along: f64, distance: f64) -> Point {
        Point::new(along, line.first.y + distance)
    }

    fn bounding_box(&self, line: &AxisLine, reach: &SideReach) -> Rect {
        Rect::from_edges(
            line.first.x - reach.before,
            line.first.y - reach.inner,
            line.second.x + reach.after,
            line.first.y + reach.outer,
        )
    }

    fn protruding_box(&self, bounding: Rect, line: &AxisLine) -> Rect {
        Rect::from_edges(
            bounding.left(),
            line.first.y.min(bounding.bottom()),
            bounding.right(),
            bounding.bottom(),
        )
    }

    fn place_text(
        &self,
        line: &AxisLine,
        along: f64,
        across: AcrossAnchor,
        along_anchor: AlongAnchor,
    ) -> TextAnchor {
        let (y, v_align) = match across {
            AcrossAnchor::Near(distance) => (line.first.y + distance, TextVAlign::Top),
            AcrossAnchor::Far(distance) => (line.first.y + distance, TextVAlign::Bottom),
            AcrossAnchor::OnLine => (line.first.y, TextVAlign::Middle),
        };
        TextAnchor {
            x: along,
            y,
            h_align: horizontal_along(along_anchor),
            v_align,
        }
    }

    fn endpoints_in_cell(&self, layout: &CellLayout) -> (Point, Point) {
        let cell = layout.cell;
        let y = match layout.anchoring {
            Anchoring::TopLeftCorner | Anchoring::BottomLeftCorner => {
                cell.top() + (layout.bounding.height - layout.protruding.height)
            }
            Anchoring::Center => cell.top() + cell.height / 2.0,
            Anchoring::TopRightCorner | Anchoring::BottomRightCorner => {
                cell.bottom() - layout.protruding.height
            }
        };
        (
            Point::new(cell.left() + layout.footer_padding, y),
            Point::new(cell.right() - layout.header_padding, y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AcrossAnchor, AlongAnchor, AxisLine, SideReach, side_for};
    use crate::axis::AxisType;
    use crate::core::Point;
    use crate::render::{TextHAlign, TextVAlign};

    fn vertical_line() -> AxisLine {
        AxisLine {
            first: Point::new(100.0, 10.0),
            second: Point::new(100.0, 210.0),
        }
    }

    #[test]
    fn left_and_right_grow_in_opposite_directions() {
        let reach = SideReach {
            outer: 30.0,
            inner: 5.0,
            before: 2.0,
            after: 3.0,
        };
        let left = side_for(AxisType::LeftY).bounding_box(&vertical_line(), &reach);
        let right = side_for(AxisType::RightY).bounding_box(&vertical_line(), &reach);

        assert_eq!((left.left(), left.right()), (70.0, 105.0));
        assert_eq!((right.left(), right.right()), (95.0, 130.0));
        assert_eq!((left.top(), left.bottom()), (8.0, 213.0));
    }

    #[test]
    fn near_anchor_faces_the_line() {
        let line = vertical_line();
        let left = side_for(AxisType::LeftY).place_text(
            &line,
            50.0,
            AcrossAnchor::Near(12.0),
            AlongAnchor::Centered,
        );
        assert_eq!((left.x, left.h_align, left.v_align), (88.0, TextHAlign::Right, TextVAlign::Middle));

        let mirrored = side_for(AxisType::LeftY).opposite().place_text(
            &line,
            50.0,
            AcrossAnchor::Near(12.0),
            AlongAnchor::Centered,
        );
        assert_eq!((mirrored.x, mirrored.h_align), (112.0, TextHAlign::Left));
    }
}
