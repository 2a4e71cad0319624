//! Display helpers for amounts and ratios.
//!
//! Undefined ratios render as `-`, never as zero.

use rust_decimal::{Decimal, RoundingStrategy};

const UNDEFINED: &str = "-";

/// Format an amount with thousands separators and a fixed number of decimals.
///
/// ```
/// use tranche_waterfall::core::format::format_number;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_number(Some(dec!(1234567.891)), 2), "1,234,567.89");
/// assert_eq!(format_number(None, 2), "-");
/// ```
pub fn format_number(value: Option<Decimal>, decimals: u32) -> String {
    match value {
        Some(v) => group_thousands(&fixed(v, decimals)),
        None => UNDEFINED.to_string(),
    }
}

/// Format a fraction (0.25) as a percentage ("25.0%").
pub fn format_percent(value: Option<Decimal>, decimals: u32) -> String {
    match value {
        Some(v) => format!("{}%", fixed(v.saturating_mul(Decimal::ONE_HUNDRED), decimals)),
        None => UNDEFINED.to_string(),
    }
}

fn fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
