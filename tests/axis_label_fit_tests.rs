use chart_axis::axis::{LabelDisplay, LabelOrientation};
use chart_axis::core::{FontSpec, Point, Size, TextMeasurer};
use chart_axis::{Axis, AxisStyleConfig, AxisType};

/// Every non-empty label measures `width` x `height` at scaling 1.
struct FixedMeasurer {
    width: f64,
    height: f64,
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _font: &FontSpec, scaling: f64, dpi_scale: f64) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        Size::new(
            self.width * scaling * dpi_scale,
            self.height * scaling * dpi_scale,
        )
    }
}

fn five_label_axis(width: f64, height: f64) -> Axis<FixedMeasurer> {
    let mut axis = Axis::with_measurer(
        AxisType::BottomX,
        FixedMeasurer { width, height },
        AxisStyleConfig::default(),
    )
    .expect("valid style");
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    axis.set_points(Point::new(0.0, 0.0), Point::new(500.0, 0.0))
        .expect("finite endpoints");
    axis
}

#[test]
fn labels_exactly_at_budget_are_not_stacked() {
    let axis = five_label_axis(125.0, 10.0);
    assert!(!axis.should_labels_be_stacked_to_fit());
}

#[test]
fn labels_one_pixel_over_budget_are_stacked() {
    let axis = five_label_axis(126.0, 10.0);
    assert!(axis.should_labels_be_stacked_to_fit());
}

#[test]
fn hidden_outer_labels_remove_the_discount() {
    let mut axis = five_label_axis(101.0, 10.0);
    assert!(!axis.should_labels_be_stacked_to_fit());

    // Without hanging outer labels the budget is 500 / 5 = 100.
    axis.show_outer_labels(false);
    assert!(axis.should_labels_be_stacked_to_fit());
}

#[test]
fn disabled_auto_stacking_returns_the_client_flag() {
    let mut axis = five_label_axis(400.0, 10.0);
    axis.enable_auto_stacking(false);
    assert!(!axis.should_labels_be_stacked_to_fit());

    axis.set_stack_labels(true);
    assert!(axis.should_labels_be_stacked_to_fit());
}

#[test]
fn perpendicular_labels_are_measured_by_height_with_padding() {
    let mut axis = five_label_axis(400.0, 124.0);
    axis.set_label_orientation(LabelOrientation::Perpendicular);
    // Budget is 125 minus 2 px of padding at scaling 1.
    assert!(axis.should_labels_be_stacked_to_fit());

    let mut axis = five_label_axis(400.0, 123.0);
    axis.set_label_orientation(LabelOrientation::Perpendicular);
    assert!(!axis.should_labels_be_stacked_to_fit());
}

#[test]
fn max_label_width_discounts_outer_labels_and_doubles_when_stacked() {
    let mut axis = five_label_axis(10.0, 10.0);
    assert_eq!(axis.calc_max_label_width(), 123.0);

    axis.set_stack_labels(true);
    assert_eq!(axis.calc_max_label_width(), 246.0);
}

#[test]
fn best_scaling_shrinks_in_steps_until_labels_fit() {
    let mut axis = Axis::with_measurer(
        AxisType::BottomX,
        FixedMeasurer {
            width: 100.0,
            height: 10.0,
        },
        AxisStyleConfig::default(),
    )
    .expect("valid style");
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    axis.set_scaling(2.0).expect("positive scaling");

    // Budget: 500 / 4 - 2 * 2 = 121 px; 100 px labels fit at 1.2.
    let fitted = axis
        .set_points(Point::new(0.0, 0.0), Point::new(500.0, 0.0))
        .expect("finite endpoints");
    assert!((fitted - 1.2).abs() < 1e-9);
    assert_eq!(axis.label_scaling(), fitted);
    assert_eq!(axis.scaling(), 2.0);
}

#[test]
fn best_scaling_floors_at_one() {
    let mut axis = Axis::with_measurer(
        AxisType::BottomX,
        FixedMeasurer {
            width: 1_000.0,
            height: 10.0,
        },
        AxisStyleConfig::default(),
    )
    .expect("valid style");
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    axis.set_scaling(3.0).expect("positive scaling");

    let fitted = axis
        .set_points(Point::new(0.0, 0.0), Point::new(500.0, 0.0))
        .expect("finite endpoints");
    assert_eq!(fitted, 1.0);
}

#[test]
fn best_scaling_keeps_small_scales_unchanged() {
    let mut axis = Axis::with_measurer(
        AxisType::BottomX,
        FixedMeasurer {
            width: 1_000.0,
            height: 10.0,
        },
        AxisStyleConfig::default(),
    )
    .expect("valid style");
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    axis.set_scaling(0.8).expect("positive scaling");

    let fitted = axis
        .set_points(Point::new(0.0, 0.0), Point::new(500.0, 0.0))
        .expect("finite endpoints");
    assert_eq!(fitted, 0.8);
}

#[test]
fn best_scaling_without_points_returns_the_axis_scaling() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_scaling(1.5).expect("positive scaling");
    let fitted = axis
        .set_points(Point::new(0.0, 0.0), Point::new(500.0, 0.0))
        .expect("finite endpoints");
    assert_eq!(fitted, 1.5);
}

#[test]
fn widest_label_tracks_label_changes() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    assert_eq!(axis.widest_label().as_deref(), Some("0"));

    axis.set_custom_label(2.0, "a much longer label");
    assert_eq!(axis.widest_label().as_deref(), Some("a much longer label"));

    axis.set_label_display(LabelDisplay::ValuesOnly);
    assert_eq!(axis.widest_label().as_deref(), Some("0"));

    axis.set_range(0.0, 20.0, 0, 10.0, 1).expect("valid range");
    assert_eq!(axis.widest_label().as_deref(), Some("10"));
}

#[test]
fn extent_cache_hits_until_the_axis_changes() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");

    let _ = axis.widest_label();
    let _ = axis.tallest_label();
    let stats = axis.label_extent_cache_stats();
    assert_eq!((stats.misses, stats.hits), (1, 1));

    axis.reverse_scale(true);
    let _ = axis.widest_label();
    let stats = axis.label_extent_cache_stats();
    assert_eq!((stats.misses, stats.hits), (2, 1));
    assert!(stats.generation.is_some());
}

#[test]
fn custom_label_modes_change_the_displayed_text() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 2.0, 0, 1.0, 1).expect("valid range");
    axis.set_custom_label(1.0, "one");

    let texts = |axis: &Axis| -> Vec<String> {
        axis.displayed_labels().into_iter().map(|label| label.text).collect()
    };
    assert_eq!(texts(&axis), vec!["0", "one", "2"]);

    axis.set_label_display(LabelDisplay::CustomLabelsAndValues);
    assert_eq!(texts(&axis), vec!["0", "one (1)", "2"]);

    axis.set_label_display(LabelDisplay::CustomLabelsOnly);
    assert_eq!(texts(&axis), vec!["one"]);

    axis.set_label_display(LabelDisplay::NoDisplay);
    assert!(texts(&axis).is_empty());
    assert!(axis.first_displayed_label().is_none());
}

#[test]
fn custom_labels_wrap_at_the_line_length() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 2.0, 0, 1.0, 1).expect("valid range");
    axis.set_custom_label(1.0, "quarterly revenue total");
    assert_eq!(
        axis.custom_label(1.0).map(|label| label.text.as_str()),
        Some("quarterly revenue total")
    );

    axis.set_label_line_length(10);
    assert_eq!(
        axis.custom_label(1.0).map(|label| label.text.as_str()),
        Some("quarterly\nrevenue\ntotal")
    );
}
