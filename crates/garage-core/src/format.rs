//! # Formatting
//!
//! Text renderings for printers and reports.
//!
//! Printers only ever see `&dyn Printable`; the layout of a ticket or a
//! receipt lives next to the data, here in the core, so every printer
//! produces the same slip.

use chrono::NaiveDateTime;

/// Timestamp layout on tickets and receipts (`MM-dd-yyyy hh:mm`).
pub const SLIP_TIMESTAMP_FORMAT: &str = "%m-%d-%Y %I:%M";

/// Border line printed above and below a ticket.
pub const TICKET_BORDER: &str = "******************************************";

/// Border line printed above and below a receipt.
pub const RECEIPT_BORDER: &str = "------------------------------------------";

/// Anything a printer can print.
pub trait Printable {
    /// Renders the slip exactly as it should appear on paper.
    fn format_for_printing(&self) -> String;
}

/// Formats an amount as US currency: `$1,234.50`, `-$0.75`.
///
/// Amounts are rounded to the nearest cent.
///
/// ## Example
/// ```rust
/// use garage_core::format::format_usd;
///
/// assert_eq!(format_usd(2.5), "$2.50");
/// assert_eq!(format_usd(1234.5), "$1,234.50");
/// ```
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();

    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Formats hours with two decimals, as on receipts and in the totals record.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Formats a ticket or receipt timestamp.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(SLIP_TIMESTAMP_FORMAT).to_string()
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(2.25), "$2.25");
        assert_eq!(format_usd(10.0), "$10.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-0.75), "-$0.75");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.0), "0.00");
        assert_eq!(format_hours(3.5), "3.50");
        assert_eq!(format_hours(2.0 / 3.0), "0.67");
    }

    #[test]
    fn test_format_timestamp_uses_twelve_hour_clock() {
        let at = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(format_timestamp(&at), "03-07-2026 02:05");
    }
}
