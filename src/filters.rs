//! Display formatting for monetary amounts and percentages.
//!
//! Amounts are whole currency units (no fractional cents); the configured
//! currency unit is appended as a suffix, yen-style: `12,345円`.

/// Format an amount with thousands separators and the currency suffix.
/// Negative amounts keep their minus sign.
pub fn format_amount(amount: i64, unit: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, format_with_thousands(amount.abs()), unit)
}

/// Format with an explicit sign, for ledger rows: `+3,000円` / `-3,000円`.
pub fn format_signed(amount: i64, unit: &str) -> String {
    let sign = if amount < 0 { "-" } else { "+" };
    format!("{}{}{}", sign, format_with_thousands(amount.abs()), unit)
}

/// Format a percentage rounded to whole points: `42%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

fn format_with_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
