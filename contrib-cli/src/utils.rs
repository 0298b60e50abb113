use contrib_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Inserts comma thousands separators into a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a money amount as `$1,234.56`, rounding half-up to cents.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = match text.split_once('.') {
        Some((whole, cents)) => (whole, cents),
        None => (text.as_str(), "00"),
    };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Like [`format_currency`] but always signed, for deltas: `+$12.00`, `-$3.50`.
pub fn format_signed_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    if rounded > Decimal::ZERO {
        format!("+{}", format_currency(rounded))
    } else {
        format_currency(rounded)
    }
}

/// Formats a percentage without trailing zeros: `7%`, `7.5%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

/// Formats an optional amount, using "—" when `None`.
pub fn opt_currency_display(value: Option<Decimal>) -> String {
    value
        .map(format_currency)
        .unwrap_or_else(|| "—".to_string())
}
