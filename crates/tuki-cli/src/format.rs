//! Argentine-style display formatting (`$ 1.234,50`, `1.234`, `dd/mm/yyyy hh:mm`).

use chrono::{DateTime, Local, TimeZone};
use tuki_normalize::parse_timestamp;

/// Formats an amount in pesos with two decimals; non-finite amounts show as zero.
pub(crate) fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = to_cents(value.abs());
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}$ {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

pub(crate) fn format_number(value: u64) -> String {
    group_thousands(value)
}

/// `dd/mm/yyyy hh:mm` in local time; unparseable input is returned as-is.
pub(crate) fn format_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |parsed| format_datetime(&parsed.with_timezone(&Local)),
    )
}

pub(crate) fn format_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// `1 product`, `3 products`.
pub(crate) fn plural(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_cents(value: f64) -> u64 {
    (value * 100.0).round() as u64
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
