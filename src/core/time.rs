use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Unit used to snap a date range and place its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateInterval {
    Daily,
    Weekly,
    Monthly,
    FiscalQuarterly,
}

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

/// Fiscal calendar, identified by the month/day its first quarter begins.
///
/// Quarters start every three months from that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FiscalYear {
    /// Starts October 1st.
    #[default]
    UsBusiness,
    /// Starts July 1st.
    Education,
    Custom { month: u32, day: u32 },
}

impl FiscalYear {
    #[must_use]
    pub const fn start_month_day(self) -> (u32, u32) {
        match self {
            Self::UsBusiness => (10, 1),
            Self::Education => (7, 1),
            Self::Custom { month, day } => (month, day),
        }
    }

    /// Month/day pairs of the four quarter starts, Q1 first.
    #[must_use]
    pub fn quarter_starts(self) -> [(u32, u32); 4] {
        let (month, day) = self.start_month_day();
        let shifted = |offset: u32| ((month.saturating_sub(1) + offset) % 12 + 1, day);
        [shifted(0), shifted(3), shifted(6), shifted(9)]
    }

    /// Rejects calendars whose quarter starts do not exist in every year.
    pub fn validate(self) -> AxisResult<()> {
        let (month, day) = self.start_month_day();
        if !(1..=12).contains(&month) {
            return Err(AxisError::InvalidData(format!(
                "fiscal year start month must be in 1..=12, got {month}"
            )));
        }
        // 2001 is not a leap year, so a day valid here is valid every year.
        for (quarter_month, quarter_day) in self.quarter_starts() {
            if NaiveDate::from_ymd_opt(2001, quarter_month, quarter_day).is_none() {
                return Err(AxisError::InvalidData(format!(
                    "fiscal quarter start {quarter_month}/{quarter_day} does not exist in every year"
                )));
            }
        }
        Ok(())
    }

    /// First day of the fiscal year containing `date`.
    #[must_use]
    pub fn year_start(self, date: NaiveDate) -> Option<NaiveDate> {
        let (month, day) = self.start_month_day();
        let this_year = NaiveDate::from_ymd_opt(date.year(), month, day)?;
        if this_year <= date {
            Some(this_year)
        } else {
            NaiveDate::from_ymd_opt(date.year() - 1, month, day)
        }
    }

    /// Last day of the fiscal year containing `date`.
    #[must_use]
    pub fn year_end(self, date: NaiveDate) -> Option<NaiveDate> {
        self.year_start(date)?
            .checked_add_months(Months::new(12))?
            .checked_sub_days(Days::new(1))
    }

    /// Calendar year in which the fiscal year starting at `year_start` ends.
    #[must_use]
    pub fn label_year(self, year_start: NaiveDate) -> Option<i32> {
        self.year_end(year_start).map(|end| end.year())
    }

    /// Quarter starts (with their 1-based quarter number) from the fiscal year
    /// containing `first` through `last`, plus the start following the last quarter.
    #[must_use]
    pub fn quarter_boundaries(self, first: NaiveDate, last: NaiveDate) -> Vec<(u8, NaiveDate)> {
        let mut boundaries = Vec::new();
        let Some(mut current) = self.year_start(first) else {
            return boundaries;
        };
        let mut quarter = 1u8;
        loop {
            boundaries.push((quarter, current));
            if current > last {
                break;
            }
            let Some(next) = current.checked_add_months(Months::new(3)) else {
                break;
            };
            current = next;
            quarter = quarter % 4 + 1;
        }
        boundaries
    }
}

#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    let back = days_since_week_start(date, week_start);
    date.checked_sub_days(Days::new(back))
}

#[must_use]
pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    let forward = 6 - days_since_week_start(date, week_start);
    date.checked_add_days(Days::new(forward))
}

fn days_since_week_start(date: NaiveDate, week_start: WeekStart) -> u64 {
    let weekday = date.weekday();
    let offset = match week_start {
        WeekStart::Sunday => weekday.num_days_from_sunday(),
        WeekStart::Monday => weekday.num_days_from_monday(),
    };
    u64::from(offset)
}

#[must_use]
pub fn start_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

#[must_use]
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    start_of_month(date)?
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
}

/// Whole days from `origin` to `date`.
#[must_use]
pub fn day_index(origin: NaiveDate, date: NaiveDate) -> i64 {
    (date - origin).num_days()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{FiscalYear, WeekStart, end_of_month, end_of_week, start_of_week};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn week_snapping_respects_first_weekday() {
        // 2024-03-13 is a Wednesday.
        let wednesday = date(2024, 3, 13);
        assert_eq!(start_of_week(wednesday, WeekStart::Sunday), Some(date(2024, 3, 10)));
        assert_eq!(end_of_week(wednesday, WeekStart::Sunday), Some(date(2024, 3, 16)));
        assert_eq!(start_of_week(wednesday, WeekStart::Monday), Some(date(2024, 3, 11)));
    }

    #[test]
    fn month_end_handles_leap_years() {
        assert_eq!(end_of_month(date(2024, 2, 10)), Some(date(2024, 2, 29)));
        assert_eq!(end_of_month(date(2023, 12, 31)), Some(date(2023, 12, 31)));
    }

    #[test]
    fn fiscal_year_bounds_and_label() {
        let fy = FiscalYear::UsBusiness;
        assert_eq!(fy.year_start(date(2024, 2, 1)), Some(date(2023, 10, 1)));
        assert_eq!(fy.year_end(date(2024, 2, 1)), Some(date(2024, 9, 30)));
        assert_eq!(fy.label_year(date(2023, 10, 1)), Some(2024));
        assert_eq!(
            FiscalYear::Education.quarter_starts(),
            [(7, 1), (10, 1), (1, 1), (4, 1)]
        );
    }

    #[test]
    fn invalid_custom_fiscal_start_is_rejected() {
        assert!(FiscalYear::Custom { month: 11, day: 31 }.validate().is_err());
        assert!(FiscalYear::Custom { month: 13, day: 1 }.validate().is_err());
        assert!(FiscalYear::Custom { month: 4, day: 6 }.validate().is_ok());
    }
}
