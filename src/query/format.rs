use chrono::NaiveDate;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a 1-based month, `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Memoization key of a canonical date, `YYYY-MM-DD`.
pub fn chart_key(canonical_date: NaiveDate) -> String {
    canonical_date.format("%Y-%m-%d").to_string()
}

/// Human readable month, e.g. "January 2021".
pub fn display_month(year: i32, month: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{} {}", name, year),
        None => format!("{}-{:02}", year, month),
    }
}
