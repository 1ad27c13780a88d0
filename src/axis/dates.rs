use std::fmt::Write as _;

use chrono::{Days, Months, NaiveDate};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::time::{day_index, end_of_month, end_of_week, start_of_month, start_of_week};
use crate::core::{DateInterval, FiscalYear, TextMeasurer};
use crate::error::{AxisError, AxisResult};

use super::{Axis, Label, LabelDisplay};

/// Calendar span mapped onto the axis as day indices from `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub interval: DateInterval,
    pub fiscal_year: FiscalYear,
}

impl<M: TextMeasurer> Axis<M> {
    /// Turns the axis into a date axis covering `start..=end`.
    ///
    /// The range is widened to whole units of `interval` (whole fiscal years for
    /// `FiscalQuarterly`); each day becomes one point and date labels replace any
    /// existing custom labels.
    pub fn set_date_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        interval: DateInterval,
        fiscal_year: FiscalYear,
    ) -> AxisResult<()> {
        fiscal_year.validate()?;
        if start > end {
            warn!(%start, %end, "rejected inverted date range");
            return Err(AxisError::InvalidDateRange { start, end });
        }

        let week_start = self.style.week_start;
        let snapped = match interval {
            DateInterval::Daily => Some((start, end)),
            DateInterval::Weekly => {
                start_of_week(start, week_start).zip(end_of_week(end, week_start))
            }
            DateInterval::Monthly => start_of_month(start).zip(end_of_month(end)),
            DateInterval::FiscalQuarterly => {
                fiscal_year.year_start(start).zip(fiscal_year.year_end(end))
            }
        };
        let Some((first, last)) = snapped else {
            warn!(%start, %end, "date range cannot be snapped within the calendar");
            return Err(AxisError::InvalidDateRange { start, end });
        };

        let range = DateRange {
            first,
            last,
            interval,
            fiscal_year,
        };
        let labels = self.date_labels(&range)?;

        let days = day_index(first, last) as f64;
        let display_interval = if interval == DateInterval::Weekly { 7 } else { 1 };
        self.apply_range(0.0, days, 0, 1.0, display_interval)?;
        self.custom_labels.clear();
        for (day, text) in labels {
            self.custom_labels
                .insert(OrderedFloat(day as f64), Label::new(text));
        }
        self.date_range = Some(range);
        self.label_display = LabelDisplay::CustomLabelsOnly;
        self.touch();

        debug!(%first, %last, ?interval, labels = self.custom_labels.len(), "set date range");
        Ok(())
    }

    #[must_use]
    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// Axis value of `date` on a date axis; `None` without a date range.
    #[must_use]
    pub fn point_from_date(&self, date: NaiveDate) -> Option<f64> {
        self.date_range
            .as_ref()
            .map(|range| day_index(range.first, date) as f64)
    }

    fn date_labels(&self, range: &DateRange) -> AxisResult<Vec<(i64, String)>> {
        let dates = labeled_dates(range, self.style.week_start);
        let mut labels = Vec::with_capacity(dates.len());
        for date in dates {
            let mut text = String::new();
            write!(text, "{}", date.format(&self.style.date_format)).map_err(|e| {
                AxisError::InvalidData(format!(
                    "failed to format date with `{}`: {e}",
                    self.style.date_format
                ))
            })?;
            labels.push((day_index(range.first, date), text));
        }
        Ok(labels)
    }
}

fn labeled_dates(range: &DateRange, week_start: crate::core::WeekStart) -> Vec<NaiveDate> {
    match range.interval {
        DateInterval::Daily => {
            step_dates(Some(range.first), range.last, |day| day.checked_add_days(Days::new(1)))
        }
        DateInterval::Weekly => step_dates(start_of_week(range.first, week_start), range.last, |day| {
            day.checked_add_days(Days::new(7))
        }),
        DateInterval::Monthly => step_dates(Some(range.first), range.last, |day| {
            day.checked_add_months(Months::new(1))
        }),
        DateInterval::FiscalQuarterly => {
            let mut dates: Vec<NaiveDate> = range
                .fiscal_year
                .quarter_boundaries(range.first, range.last)
                .into_iter()
                .map(|(_, start)| start)
                .filter(|start| *start >= range.first && *start <= range.last)
                .collect();
            if dates.last() != Some(&range.last) {
                dates.push(range.last);
            }
            dates
        }
    }
}

/// Walks from `first` while dates stay `<= last`; leaving the calendar ends the walk.
fn step_dates(
    first: Option<NaiveDate>,
    last: NaiveDate,
    step: impl Fn(NaiveDate) -> Option<NaiveDate>,
) -> Vec<NaiveDate> {
    std::iter::successors(first, |day| step(*day))
        .take_while(|day| *day <= last)
        .collect()
}
