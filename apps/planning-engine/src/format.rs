//! Formatting utilities for plan and simulation display.

use rust_decimal::Decimal;

use crate::planner::constants::HUNDRED;

/// Format a currency amount with two decimal places.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    if value < Decimal::ZERO {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

/// Format a probability fraction as a percentage string.
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value * HUNDRED)
}

/// Format an optional day count.
#[must_use]
pub fn format_days(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |days| format!("{days:.1}"))
}
