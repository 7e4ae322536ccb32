//! Currency and date display formatting.
//!
//! Shared by the page templates, the CSV export and email template
//! variables. Pure string work; no business rules live here.

use chrono::{DateTime, NaiveDate, Utc};

/// Format integer cents as US dollars with thousands grouping:
/// `123456` becomes `"$1,234.56"`.
pub fn format_currency(cents: i64) -> String {
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{fraction:02}")
    } else {
        format!("${grouped}.{fraction:02}")
    }
}

/// Short US date: `"Jan 5, 2025"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Short US date with 12-hour time: `"Jan 5, 2025, 3:07 PM"`.
pub fn format_date_time(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y, %-I:%M %p").to_string()
}
