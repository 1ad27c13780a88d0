use chart_axis::axis::{AxisBracket, BracketLineShape, LabelOrientation};
use chart_axis::core::{FontSpec, Point, Size, TextMeasurer};
use chart_axis::render::{NullRenderer, StrokeRole, TextHAlign, TextRole, TextVAlign};
use chart_axis::{Axis, AxisStyleConfig, AxisType};

struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _font: &FontSpec, scaling: f64, dpi_scale: f64) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        Size::new(20.0 * scaling * dpi_scale, 10.0 * scaling * dpi_scale)
    }
}

fn placed(axis_type: AxisType) -> Axis<FixedMeasurer> {
    let mut axis = Axis::with_measurer(axis_type, FixedMeasurer, AxisStyleConfig::default())
        .expect("valid style");
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    let (p1, p2) = if axis_type.is_vertical() {
        (Point::new(50.0, 0.0), Point::new(50.0, 400.0))
    } else {
        (Point::new(0.0, 100.0), Point::new(400.0, 100.0))
    };
    axis.set_points(p1, p2).expect("finite endpoints");
    axis
}

#[test]
fn null_renderer_receives_line_ticks_and_labels() {
    let axis = placed(AxisType::BottomX);
    let mut renderer = NullRenderer::default();

    let drawn = axis.draw(&mut renderer).expect("placed axis draws");

    assert_eq!(Some(drawn), axis.bounding_box());
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_primitive_counts(), (6, 5), "axis line + 5 ticks, 5 labels");

    let frame = renderer.last_frame.as_ref().expect("frame recorded");
    assert_eq!(frame.lines_with_role(StrokeRole::TickMark).count(), 5);
    assert_eq!(frame.axis_label_strings(), vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn bottom_labels_hang_below_the_ticks() {
    let axis = placed(AxisType::BottomX);
    let frame = axis.build_render_frame().expect("build frame");
    frame.validate().expect("valid frame");

    let first = &frame.texts[0];
    assert_eq!(first.text, "0");
    assert_eq!(first.anchor, Point::new(0.0, 114.0));
    assert_eq!((first.h_align, first.v_align), (TextHAlign::Center, TextVAlign::Top));
    assert!(!first.rotated);

    let tick = frame.lines[1];
    assert_eq!(tick.role, StrokeRole::TickMark);
    assert_eq!((tick.from, tick.to), (Point::new(0.0, 110.0), Point::new(0.0, 100.0)));
    assert_eq!(tick.length(), 10.0);
}

#[test]
fn left_labels_are_rotated_and_right_aligned() {
    let axis = placed(AxisType::LeftY);
    let frame = axis.build_render_frame().expect("build frame");

    let first = &frame.texts[0];
    assert_eq!(first.text, "0");
    assert_eq!(first.anchor, Point::new(36.0, 400.0));
    assert_eq!(first.h_align, TextHAlign::Right);
    assert!(first.rotated);
}

#[test]
fn perpendicular_labels_on_a_horizontal_axis_are_rotated() {
    let mut axis = placed(AxisType::BottomX);
    axis.set_label_orientation(LabelOrientation::Perpendicular);
    let frame = axis.build_render_frame().expect("build frame");
    assert!(frame.texts.iter().all(|text| text.rotated));
}

#[test]
fn double_sided_labels_mirror_across_the_line() {
    let mut axis = placed(AxisType::BottomX);
    axis.set_double_sided_labels(true);
    let frame = axis.build_render_frame().expect("build frame");

    assert_eq!(frame.texts.len(), 10);
    let inner = &frame.texts[1];
    assert_eq!(inner.anchor, Point::new(0.0, 96.0));
    assert_eq!(inner.v_align, TextVAlign::Bottom);
}

#[test]
fn stacked_labels_alternate_rows() {
    let mut axis = placed(AxisType::BottomX);
    axis.set_stack_labels(true);
    let frame = axis.build_render_frame().expect("build frame");

    let rows: Vec<f64> = frame.texts.iter().map(|text| text.anchor.y).collect();
    assert_eq!(rows, vec![114.0, 124.0, 114.0, 124.0, 114.0]);
}

#[test]
fn unplaced_axis_cannot_draw() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    let mut renderer = NullRenderer::default();

    assert!(axis.draw(&mut renderer).is_err());
    assert!(renderer.last_frame.is_none());
}

#[test]
fn bracket_shapes_add_their_strokes() {
    let mut axis = placed(AxisType::BottomX);
    axis.add_bracket(AxisBracket::new(0.0, 2.0, 1.0, "first half"))
        .expect("valid bracket");
    let frame = axis.build_render_frame().expect("build frame");
    assert_eq!(frame.lines_with_role(StrokeRole::Bracket).count(), 3);
    assert_eq!(frame.texts.len(), 5 + 1);

    let caption = frame
        .texts_with_role(TextRole::BracketCaption)
        .next()
        .expect("bracket caption");
    assert_eq!(caption.text, "first half");
    assert_eq!(caption.anchor.x, 100.0);
    assert!(!caption.rotated);

    axis.clear_brackets();
    axis.add_bracket(
        AxisBracket::new(0.0, 2.0, 1.0, "arrow").with_line_shape(BracketLineShape::Arrow),
    )
    .expect("valid bracket");
    let frame = axis.build_render_frame().expect("build frame");
    assert_eq!(frame.lines_with_role(StrokeRole::Bracket).count(), 5);

    axis.clear_brackets();
    axis.add_bracket(
        AxisBracket::new(0.0, 2.0, 1.0, "bare").with_line_shape(BracketLineShape::NoLine),
    )
    .expect("valid bracket");
    let frame = axis.build_render_frame().expect("build frame");
    assert_eq!(frame.lines_with_role(StrokeRole::Bracket).count(), 0);
    assert_eq!(frame.texts_with_role(TextRole::BracketCaption).count(), 1);
}

#[test]
fn hidden_labels_draw_only_strokes() {
    let mut axis = placed(AxisType::BottomX);
    axis.show_labels(false);
    let frame = axis.build_render_frame().expect("build frame");

    assert!(frame.texts.is_empty());
    assert_eq!(frame.lines.len(), 6);
}

#[test]
fn vertical_title_is_rotated_beside_the_labels() {
    let mut axis = placed(AxisType::LeftY);
    axis.set_title("Revenue".into());
    let frame = axis.build_render_frame().expect("build frame");

    let title = frame.texts_with_role(TextRole::Title).next().expect("title text");
    assert_eq!(title.text, "Revenue");
    assert_eq!(title.anchor, Point::new(22.0, 200.0));
    assert!(title.rotated);
}

#[test]
fn header_and_footer_sit_past_the_ends() {
    let mut axis = placed(AxisType::BottomX);
    axis.set_header("max".into());
    axis.set_footer("min".into());
    let frame = axis.build_render_frame().expect("build frame");

    let header = frame.texts_with_role(TextRole::Header).next().expect("header text");
    assert_eq!(header.text, "max");
    assert_eq!(header.anchor, Point::new(414.0, 100.0));
    assert_eq!(header.h_align, TextHAlign::Left);

    let footer = frame.texts_with_role(TextRole::Footer).next().expect("footer text");
    assert_eq!(footer.text, "min");
    assert_eq!((footer.anchor.x, footer.h_align), (-14.0, TextHAlign::Right));
}

#[test]
fn zero_span_bracket_draws_one_connecting_tick() {
    for shape in [BracketLineShape::Lines, BracketLineShape::Arrow] {
        let mut axis = placed(AxisType::BottomX);
        axis.add_bracket(AxisBracket::new(2.0, 2.0, 2.0, "one").with_line_shape(shape))
            .expect("valid bracket");
        let frame = axis.build_render_frame().expect("build frame");

        let strokes: Vec<_> = frame.lines_with_role(StrokeRole::Bracket).collect();
        assert_eq!(strokes.len(), 1, "{shape:?}");
        let tick = strokes[0];
        assert_eq!((tick.from.x, tick.to.x), (200.0, 200.0));
        assert!(tick.from.y > tick.to.y, "tick reaches back toward the line");
        assert_eq!(frame.texts_with_role(TextRole::BracketCaption).count(), 1);
    }
}

#[test]
fn bracket_outside_the_axis_range_is_skipped() {
    let mut axis = placed(AxisType::BottomX);
    axis.add_bracket(AxisBracket::new(2.0, 9.0, 3.0, "beyond"))
        .expect("valid bracket");
    axis.add_bracket(AxisBracket::new(-1.0, 1.0, 0.0, "before"))
        .expect("valid bracket");
    let frame = axis.build_render_frame().expect("build frame");

    assert_eq!(frame.lines_with_role(StrokeRole::Bracket).count(), 0);
    assert_eq!(frame.texts_with_role(TextRole::BracketCaption).count(), 0);
    assert_eq!(frame.axis_label_strings().len(), 5);
}
