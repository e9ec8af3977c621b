use chrono::{Months, NaiveDate};

/// First and last calendar day of a billing month
///
/// `None` when `month` is outside 1..=12 or the year is out of chrono's range.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = first_day.checked_add_months(Months::new(1))?.pred_opt()?;

    Some((first_day, last_day))
}
