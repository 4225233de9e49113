use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// First day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - first_day.num_days_from_monday()) % 7;
    date.checked_sub_signed(Duration::days(i64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn same_week(a: NaiveDate, b: NaiveDate, first_day: Weekday) -> bool {
    week_start_of(a, first_day) == week_start_of(b, first_day)
}

pub fn week_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_signed(Duration::days(6)).unwrap_or(NaiveDate::MAX)
}

/// Moves `start` by whole weeks; negative steps go back in time.
pub fn shift_weeks(start: NaiveDate, weeks: i64) -> NaiveDate {
    start
        .checked_add_signed(Duration::weeks(weeks))
        .unwrap_or(start)
}

pub fn is_current_week(start: NaiveDate, today: NaiveDate) -> bool {
    (start..=week_end(start)).contains(&today)
}

/// "Jan 7 - Jan 13"
pub fn week_label(start: NaiveDate) -> String {
    format!(
        "{} - {}",
        start.format("%b %-d"),
        week_end(start).format("%b %-d")
    )
}
