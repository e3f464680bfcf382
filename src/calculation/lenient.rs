//! Forgiving numeric coercion for manually entered values.
//!
//! Payroll figures are typed by hand, so a stray character or an empty field
//! must never abort a calculation. Everything that is not a non-negative
//! number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Clamps a value to zero if it is negative.
///
/// # Example
///
/// ```
/// use paysplit_engine::calculation::non_negative;
/// use rust_decimal::Decimal;
///
/// assert_eq!(non_negative(Decimal::from(-5)), Decimal::ZERO);
/// assert_eq!(non_negative(Decimal::from(5)), Decimal::from(5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Parses user-entered text into a non-negative decimal.
///
/// Leading whitespace is ignored and the longest leading decimal literal is
/// used, so `"12.5 days"` reads as `12.5`. Empty, non-numeric, negative and
/// out-of-range input all yield zero.
///
/// # Example
///
/// ```
/// use paysplit_engine::calculation::parse_lenient;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_lenient("12.5 days"), Decimal::from_str("12.5").unwrap());
/// assert_eq!(parse_lenient(""), Decimal::ZERO);
/// assert_eq!(parse_lenient("-3"), Decimal::ZERO);
/// assert_eq!(parse_lenient("abc"), Decimal::ZERO);
/// ```
pub fn parse_lenient(input: &str) -> Decimal {
    match leading_literal(input.trim()) {
        Some(literal) => Decimal::from_str(&literal)
            .map(non_negative)
            .unwrap_or(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

/// Extracts the leading `[+-]digits[.digits]` literal, normalised so that
/// `Decimal::from_str` accepts it. Negative literals return `None`.
fn leading_literal(text: &str) -> Option<String> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let integer: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let after_integer = &rest[integer.len()..];
    let fraction: String = after_integer
        .strip_prefix('.')
        .map(|tail| tail.chars().take_while(char::is_ascii_digit).collect())
        .unwrap_or_default();

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if negative {
        return None;
    }

    let integer = if integer.is_empty() { "0".to_string() } else { integer };
    if fraction.is_empty() {
        Some(integer)
    } else {
        Some(format!("{}.{}", integer, fraction))
    }
}

fn decimal_from_number(number: &Number) -> Decimal {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(non_negative)
        .unwrap_or(Decimal::ZERO)
}

/// Coerces an arbitrary JSON value into a non-negative decimal.
///
/// Numbers and numeric strings are parsed; `null`, booleans, arrays and
/// objects become zero.
pub fn coerce_value(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => decimal_from_number(number),
        Value::String(text) => parse_lenient(text),
        _ => Decimal::ZERO,
    }
}

/// Serde helper that deserializes any JSON-like value into a non-negative decimal.
///
/// Use together with `#[serde(default)]` so that missing fields also become zero.
///
/// # Example
///
/// ```
/// use paysplit_engine::calculation::deserialize_non_negative;
/// use rust_decimal::Decimal;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, deserialize_with = "deserialize_non_negative")]
///     amount: Decimal,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"amount": "  7.25"}"#).unwrap();
/// assert_eq!(row.amount.to_string(), "7.25");
/// let row: Row = serde_json::from_str(r#"{"amount": null}"#).unwrap();
/// assert_eq!(row.amount, Decimal::ZERO);
/// ```
pub fn deserialize_non_negative<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_value).unwrap_or(Decimal::ZERO))
}
