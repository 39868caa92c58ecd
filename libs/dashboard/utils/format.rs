//! Display formatting for quantities, prices, entities and timestamps

use chrono::{DateTime, Local, Utc};

const MAX_FRACTION_DIGITS: usize = 8;

/// Quantity with up to 8 fraction digits and thousands separators
pub fn format_quantity(quantity: f64) -> String {
    format_number(quantity, 0)
}

/// USD price with 2 to 8 fraction digits, `-` when absent
pub fn format_price(price: Option<f64>) -> String {
    match price {
        None => "-".to_string(),
        Some(price) if price < 0.0 => format!("-${}", format_number(-price, 2)),
        Some(price) => format!("${}", format_number(price, 2)),
    }
}

fn format_number(value: f64, min_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_fraction_digits {
        frac.push('0');
    }

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Display name of an entity wire value, `new_york` becomes `New York`
pub fn entity_label(entity: &str) -> String {
    entity
        .replacen('_', " ", 1)
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Timestamp in the local timezone
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Coarse relative label: `just now`, `5m ago`, `3h ago`, `2d ago`
pub fn from_now(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed_ms = (*now - *ts).num_milliseconds() as f64;

    let mins = round_half_up(elapsed_ms / 60_000.0);
    if mins.abs() < 1.0 {
        return "just now".to_string();
    }
    if mins.abs() < 60.0 {
        return format!("{}m ago", mins);
    }

    let hrs = round_half_up(mins / 60.0);
    if hrs.abs() < 24.0 {
        return format!("{}h ago", hrs);
    }

    let days = round_half_up(hrs / 24.0);
    format!("{}d ago", days)
}

/// Rounds halves toward positive infinity
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
