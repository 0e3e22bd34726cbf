//! SGD display formatting and lenient numeric parsing
//!
//! Display aggregates are rounded to whole dollars; nothing here is used
//! mid-computation.

use crate::error::{CalcError, CalcResult};

/// Format an amount as whole Singapore dollars, e.g. `S$1,234,568`
pub fn format_sgd(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}S${}", sign, group_thousands(rounded.abs() as u64))
}

/// Format an amount with cents, e.g. `S$336.00`
pub fn format_sgd_cents(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}S${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Format a percentage value (already scaled by 100) with two decimals
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a currency/number field, treating blank, non-numeric and non-finite input as zero
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("S$")
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Treat NaN/infinite or negative amounts as zero
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a property count strictly: blank means 0, negatives and garbage are rejected
pub fn parse_count(field: &str, raw: &str) -> CalcResult<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(CalcError::invalid_input(field, "must not be negative")),
        Ok(n) => u32::try_from(n).map_err(|_| CalcError::invalid_input(field, "is too large")),
        Err(_) => Err(CalcError::invalid_input(
            field,
            format!("'{}' is not a whole number", trimmed),
        )),
    }
}
