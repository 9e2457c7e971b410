//! Selection of the calendar dates that take part in a consumption report.

use crate::date_range::DateRange;
use crate::month::MonthSet;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use wsim_utils::dates::last_day_of_month;

/// An explicit period with month and weekend filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSelection {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub months: MonthSet,
    #[serde(default = "included")]
    pub include_saturdays: bool,
    #[serde(default = "included")]
    pub include_sundays: bool,
}

fn included() -> bool {
    true
}

impl PeriodSelection {
    /// A period with every month and every weekday selected.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        PeriodSelection {
            start_date,
            end_date,
            months: MonthSet::all(),
            include_saturdays: true,
            include_sundays: true,
        }
    }

    pub fn accepts(&self, date: &NaiveDate) -> bool {
        if !self.months.contains_date(date) {
            return false;
        }
        match date.weekday() {
            Weekday::Sat => self.include_saturdays,
            Weekday::Sun => self.include_sundays,
            _ => true,
        }
    }
}

/// Lazy iterator over the dates of a [`PeriodSelection`], in ascending order.
///
/// Cloning it before iterating gives a fresh pass over the same dates.
#[derive(Debug, Clone)]
pub struct SelectedDates {
    range: DateRange,
    selection: PeriodSelection,
}

impl Iterator for SelectedDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let selection = &self.selection;
        self.range.by_ref().find(|date| selection.accepts(date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.range.size_hint().1)
    }
}

/// Dates in `[start_date, end_date]` whose month is selected and whose
/// weekday is not an excluded weekend day.
pub fn select_dates(selection: &PeriodSelection) -> SelectedDates {
    SelectedDates {
        range: DateRange(selection.start_date, selection.end_date),
        selection: selection.clone(),
    }
}

/// Legacy selection mode: every day of every selected month, for each year
/// in `[start_year, end_year]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRangeSelection {
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default)]
    pub months: MonthSet,
    /// Last date allowed in the output, when the run is limited to the present.
    #[serde(default)]
    pub until: Option<NaiveDate>,
}

pub fn select_year_range(selection: &YearRangeSelection) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for year in selection.start_year..=selection.end_year {
        for month in selection.months.iter() {
            let first = NaiveDate::from_ymd_opt(year, month.number(), 1);
            let last = last_day_of_month(year, month.number());
            let (Some(first), Some(last)) = (first, last) else {
                continue;
            };
            let last = match selection.until {
                Some(until) if until < last => until,
                _ => last,
            };
            dates.extend(DateRange(first, last));
        }
    }
    dates
}

/// Where the dates of a consumption report come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateSource {
    Period(PeriodSelection),
    YearRange(YearRangeSelection),
}

impl DateSource {
    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            DateSource::Period(period) => select_dates(period).collect(),
            DateSource::YearRange(years) => select_year_range(years),
        }
    }
}
