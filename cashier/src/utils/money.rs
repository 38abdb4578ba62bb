//! Rupiah display formatting
//!
//! Amounts are shown the way the Indonesian locale prints them:
//! `.` groups thousands and `,` separates the fraction (`Rp 1.250.000,5`).

use rust_decimal::Decimal;

/// Format an amount as `Rp 35.000`
pub fn format_rupiah(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let normalized = amount.abs().normalize().to_string();
    let (int_part, frac_part) = match normalized.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (normalized.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}Rp {grouped},{frac}"),
        None => format!("{sign}Rp {grouped}"),
    }
}
