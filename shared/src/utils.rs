//! # Shared Display Helpers
//!
//! Formatting used by console front ends when rendering list rows.
//!
//! - [`shorten`] - Elide the middle of long identifiers and withdrawal addresses
//! - [`short_id`] - [`shorten`] with the console's default widths
//! - [`format_amount`] - Two-decimal amount with thousands separators
//!
//! ```rust
//! use shared::utils::{format_amount, short_id};
//!
//! assert_eq!(short_id("0x52908400098527886E0F7030069857D2E4169EE7"), "0x5290...9EE7");
//! assert_eq!(format_amount(1234567.5), "1,234,567.50");
//! ```

/// Keep the first `prefix_len` and last `suffix_len` characters of `value`.
///
/// Values too short to elide meaningfully are returned unchanged. Works on
/// characters, so non-ASCII input never splits a code point.
pub fn shorten(value: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();

    if len <= prefix_len + suffix_len + 3 {
        return value.to_string();
    }

    let prefix: String = chars.iter().take(prefix_len).collect();
    let suffix: String = chars.iter().skip(len - suffix_len).collect();

    format!("{}...{}", prefix, suffix)
}

/// [`shorten`] with a 6-character prefix and 4-character suffix
pub fn short_id(value: &str) -> String {
    shorten(value, 6, 4)
}

/// Render an amount with two decimals and `,` thousands separators
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-{}.{}", grouped, fraction)
    } else {
        format!("{}.{}", grouped, fraction)
    }
}
