use serde::Serializer;
use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so $50.00 = 5000 cents.
pub type Cents = i64;

/// Cents in one whole currency unit.
pub const CENTS_PER_UNIT: Cents = 100;

/// Every full 100 units moved costs 1 unit of tax.
const TAX_BRACKET: Cents = 100 * CENTS_PER_UNIT;
const TAX_PER_BRACKET: Cents = CENTS_PER_UNIT;

/// Tax charged on a movement of `amount` cents: one whole unit per full
/// hundred units, i.e. `floor(amount_units / 100)` units.
/// Example: 250.00 -> 2.00, 99.99 -> 0.00, 1000.00 -> 10.00
pub fn tax_for(amount: Cents) -> Cents {
    if amount <= 0 {
        return 0;
    }
    (amount / TAX_BRACKET) * TAX_PER_BRACKET
}

/// Format cents as a currency string.
/// Example: 5000 -> "$50.00", -1000 -> "-$10.00"
pub fn format_currency(cents: Cents) -> String {
    let plain = format_cents(cents);
    match plain.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", plain),
    }
}

/// Format cents as a plain decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / CENTS_PER_UNIT as u64;
    let remainder = abs_cents % CENTS_PER_UNIT as u64;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Serialize cents as a decimal string in whole units, e.g. `"1248.00"`.
pub fn serialize_units<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_cents(*cents))
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !decimal_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::OutOfRange)?
    };

    // Pad or truncate the decimal part to 2 digits
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().map_err(|_| ParseCentsError::InvalidFormat)? * 10,
        _ => decimal_str[..2]
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    let cents = units
        .checked_mul(CENTS_PER_UNIT)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::OutOfRange)?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("invalid money format")]
    InvalidFormat,
    #[error("amount is too large")]
    OutOfRange,
}
