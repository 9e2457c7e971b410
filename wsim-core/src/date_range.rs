use chrono::{NaiveDate, TimeDelta};
use std::mem::replace;

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Number of days left in the range.
    pub fn len_days(&self) -> usize {
        let days = (self.1 - self.0).num_days() + 1;
        days.max(0) as usize
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        match self.0.checked_add_signed(TimeDelta::days(1)) {
            Some(next) => Some(replace(&mut self.0, next)),
            None => {
                // NaiveDate::MAX has no successor, so pull the end below the cursor
                let current = self.0;
                if let Some(previous) = current.pred_opt() {
                    self.1 = previous;
                }
                Some(current)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len_days();
        (remaining, Some(remaining))
    }
}
