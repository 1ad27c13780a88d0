use chart_axis::axis::{BracketType, LabelDisplay};
use chart_axis::core::{DateInterval, FiscalYear, WeekStart};
use chart_axis::{Axis, AxisError, AxisStyleConfig, AxisType};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn labels(axis: &Axis) -> Vec<(f64, String)> {
    axis.custom_labels()
        .map(|(value, label)| (value, label.text.clone()))
        .collect()
}

#[test]
fn monthly_range_snaps_to_whole_months() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_date_range(
        date(2024, 1, 10),
        date(2024, 3, 15),
        DateInterval::Monthly,
        FiscalYear::default(),
    )
    .expect("valid date range");

    let range = axis.date_range().expect("date range is recorded");
    assert_eq!(range.first, date(2024, 1, 1));
    assert_eq!(range.last, date(2024, 3, 31));
    assert_eq!(axis.range(), (0.0, 90.0));
    assert_eq!(axis.point_count(), 91);
    assert_eq!(axis.label_display(), LabelDisplay::CustomLabelsOnly);
    assert_eq!(
        labels(&axis),
        vec![
            (0.0, "2024-01-01".to_owned()),
            (31.0, "2024-02-01".to_owned()),
            (60.0, "2024-03-01".to_owned()),
        ]
    );
    assert_eq!(axis.point_from_date(date(2024, 2, 1)), Some(31.0));
}

#[test]
fn weekly_range_uses_configured_week_start() {
    let mut style = AxisStyleConfig::default();
    style.week_start = WeekStart::Sunday;
    style.date_format = "%b %d".to_owned();
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_style(style).expect("valid style");

    // 2024-03-13 is a Wednesday.
    axis.set_date_range(
        date(2024, 3, 13),
        date(2024, 3, 20),
        DateInterval::Weekly,
        FiscalYear::default(),
    )
    .expect("valid date range");

    let range = axis.date_range().expect("date range is recorded");
    assert_eq!(range.first, date(2024, 3, 10));
    assert_eq!(range.last, date(2024, 3, 23));
    assert_eq!(axis.range_info().display_interval, 7);
    assert_eq!(
        labels(&axis),
        vec![(0.0, "Mar 10".to_owned()), (7.0, "Mar 17".to_owned())]
    );

    let shown: Vec<f64> = axis
        .points()
        .iter()
        .filter(|point| point.is_shown())
        .map(|point| point.value())
        .collect();
    assert_eq!(shown, vec![0.0, 7.0]);
}

#[test]
fn daily_range_labels_every_day() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_date_range(
        date(2024, 2, 28),
        date(2024, 3, 1),
        DateInterval::Daily,
        FiscalYear::default(),
    )
    .expect("valid date range");

    assert_eq!(
        labels(&axis),
        vec![
            (0.0, "2024-02-28".to_owned()),
            (1.0, "2024-02-29".to_owned()),
            (2.0, "2024-03-01".to_owned()),
        ]
    );
    let displayed: Vec<String> = axis.displayed_labels().into_iter().map(|label| label.text).collect();
    assert_eq!(displayed.len(), 3);
}

#[test]
fn fiscal_quarterly_range_covers_whole_fiscal_years() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_date_range(
        date(2024, 1, 15),
        date(2024, 2, 20),
        DateInterval::FiscalQuarterly,
        FiscalYear::UsBusiness,
    )
    .expect("valid date range");

    let range = axis.date_range().expect("date range is recorded");
    assert_eq!(range.first, date(2023, 10, 1));
    assert_eq!(range.last, date(2024, 9, 30));
    assert_eq!(axis.range(), (0.0, 365.0));

    let label_days: Vec<f64> = labels(&axis).into_iter().map(|(day, _)| day).collect();
    assert_eq!(label_days, vec![0.0, 92.0, 183.0, 274.0, 365.0]);
}

#[test]
fn fiscal_quarter_brackets_follow_the_date_range() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_date_range(
        date(2024, 1, 15),
        date(2024, 2, 20),
        DateInterval::FiscalQuarterly,
        FiscalYear::UsBusiness,
    )
    .expect("valid date range");

    let added = axis
        .add_brackets(BracketType::FiscalQuarterly)
        .expect("date range is set");
    assert_eq!(added, 4);

    let captions: Vec<&str> = axis
        .brackets()
        .iter()
        .map(|bracket| bracket.label.text.as_str())
        .collect();
    assert_eq!(captions, vec!["Q1FY24", "Q2FY24", "Q3FY24", "Q4FY24"]);

    let first = &axis.brackets()[0];
    assert_eq!((first.start, first.end), (0.0, 91.0));
    assert_eq!(first.label_position, 45.5);
    let last = &axis.brackets()[3];
    assert_eq!((last.start, last.end), (274.0, 365.0));
}

#[test]
fn education_fiscal_year_labels_by_ending_year() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_date_range(
        date(2023, 8, 1),
        date(2023, 8, 2),
        DateInterval::FiscalQuarterly,
        FiscalYear::Education,
    )
    .expect("valid date range");
    axis.add_brackets(BracketType::FiscalQuarterly)
        .expect("date range is set");

    assert_eq!(axis.brackets()[0].label.text, "Q1FY24");
    assert_eq!(axis.date_range().map(|range| range.first), Some(date(2023, 7, 1)));
}

#[test]
fn fiscal_brackets_require_a_date_range() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 10.0, 0, 1.0, 1).expect("valid range");
    let err = axis
        .add_brackets(BracketType::FiscalQuarterly)
        .expect_err("numeric axis has no dates");
    assert!(matches!(err, AxisError::MissingDateRange));
}

#[test]
fn inverted_date_range_is_rejected() {
    let mut axis = Axis::new(AxisType::BottomX);
    let err = axis
        .set_date_range(
            date(2024, 3, 1),
            date(2024, 1, 1),
            DateInterval::Daily,
            FiscalYear::default(),
        )
        .expect_err("inverted range");
    assert!(matches!(err, AxisError::InvalidDateRange { .. }));
    assert!(axis.date_range().is_none());
}

#[test]
fn invalid_custom_fiscal_year_is_rejected() {
    let mut axis = Axis::new(AxisType::BottomX);
    let result = axis.set_date_range(
        date(2024, 1, 1),
        date(2024, 2, 1),
        DateInterval::FiscalQuarterly,
        FiscalYear::Custom { month: 11, day: 31 },
    );
    assert!(result.is_err());
}

#[test]
fn numeric_range_clears_the_date_range() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_date_range(
        date(2024, 1, 1),
        date(2024, 1, 31),
        DateInterval::Daily,
        FiscalYear::default(),
    )
    .expect("valid date range");
    assert!(axis.point_from_date(date(2024, 1, 2)).is_some());

    axis.set_range(0.0, 10.0, 0, 1.0, 1).expect("valid range");
    assert!(axis.date_range().is_none());
    assert_eq!(axis.point_from_date(date(2024, 1, 2)), None);
}

#[test]
fn time_of_day_format_is_rejected_by_style_validation() {
    let mut style = AxisStyleConfig::default();
    style.date_format = "%Y %H".to_owned();

    let mut axis = Axis::new(AxisType::BottomX);
    assert!(axis.set_style(style).is_err());
    assert!(AxisStyleConfig::from_json_str(r#"{"date_format": "%Y %H"}"#).is_err());
}

#[test]
fn rejected_date_range_keeps_the_previous_axis() {
    let mut axis = Axis::new(AxisType::BottomX);
    axis.set_range(0.0, 4.0, 0, 1.0, 1).expect("valid range");
    axis.set_custom_label(2.0, "mid");

    // Roughly 300 years of days is past the point cap.
    let result = axis.set_date_range(
        date(1800, 1, 1),
        date(2100, 1, 1),
        DateInterval::Daily,
        FiscalYear::default(),
    );

    assert!(result.is_err());
    assert_eq!(axis.point_count(), 5);
    assert_eq!(axis.range(), (0.0, 4.0));
    assert_eq!(labels(&axis), vec![(2.0, "mid".to_owned())]);
    assert!(axis.date_range().is_none());
}

#[test]
fn daily_range_may_end_on_the_last_calendar_day() {
    let last = NaiveDate::MAX;
    let first = last.checked_sub_days(chrono::Days::new(3)).expect("in calendar");
    let mut axis = Axis::new(AxisType::BottomX);

    axis.set_date_range(first, last, DateInterval::Daily, FiscalYear::default())
        .expect("range ending at the calendar edge");

    assert_eq!(axis.point_count(), 4);
    assert_eq!(labels(&axis).len(), 4);
}
