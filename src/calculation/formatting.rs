//! Swedish display formatting for amounts and durations.

use rust_decimal::Decimal;

/// Formats an amount as whole kronor with space thousands grouping.
///
/// Öre are truncated, not rounded.
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from_str("26787.95").unwrap()), "26 787 kr");
/// assert_eq!(format_currency(Decimal::from(180)), "180 kr");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount.trunc();
    let digits = whole.abs().normalize().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if whole.is_sign_negative() && !whole.is_zero() { "-" } else { "" };
    format!("{}{} kr", sign, grouped)
}

/// Renders a day count as a rough Swedish duration.
///
/// Years are 365 days and months 30 days. Zero or negative counts render
/// as "Utgånget".
pub fn format_days_until(days: i64) -> String {
    if days <= 0 {
        return "Utgånget".to_string();
    }

    let years = days / 365;
    let months = (days % 365) / 30;
    let rest = days % 30;

    match (years, months, rest) {
        (y, m, _) if y > 0 && m > 0 => format!("{} år och {} mån", y, m),
        (y, _, _) if y > 0 => format!("{} år", y),
        (_, m, r) if m > 0 && r > 0 => format!("{} mån och {} dagar", m, r),
        (_, m, _) if m > 0 => format!("{} månader", m),
        (_, _, r) => format!("{} dagar", r),
    }
}
