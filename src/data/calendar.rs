//! Weekly date sequence for the panel's time axis.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::AppError;

/// All dates in `[start, end]` that fall on `anchor`, one week apart.
///
/// The first date is the first `anchor` weekday on or after `start`.
pub fn weekly_dates(start: NaiveDate, end: NaiveDate, anchor: Weekday) -> Result<Vec<NaiveDate>, AppError> {
    if end < start {
        return Err(AppError::input(format!("Invalid date range: end {end} is before start {start}.")));
    }

    let shift = (7 + anchor.num_days_from_monday() as i64 - start.weekday().num_days_from_monday() as i64) % 7;
    let mut current = start
        .checked_add_signed(Duration::days(shift))
        .ok_or_else(|| AppError::input("Date range start is out of range."))?;

    let mut out = Vec::new();
    while current <= end {
        out.push(current);
        current = match current.checked_add_signed(Duration::days(7)) {
            Some(next) => next,
            None => break,
        };
    }

    if out.is_empty() {
        return Err(AppError::input(format!(
            "No {anchor:?} falls between {start} and {end}; the panel would be empty."
        )));
    }
    Ok(out)
}
