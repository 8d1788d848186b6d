//! Path identifier coercion
//!
//! Raw path segments are coerced to a number, then required to be an
//! integer, then required to be positive. The first failing rule of the
//! first failing parameter is reported.
//!
//! Coercion accepts what a lenient numeric-string conversion accepts:
//! surrounding whitespace, an empty string (zero), `0x`/`0o`/`0b` literals,
//! decimals, exponents and `Infinity`.

use super::errors::{IdRule, ValidationError, ValidationResult};
use super::rules::trim_whitespace;
use crate::model::BookId;

const RADIX_PREFIXES: [(&str, u32); 6] = [
    ("0x", 16),
    ("0X", 16),
    ("0o", 8),
    ("0O", 8),
    ("0b", 2),
    ("0B", 2),
];

/// Coerces a string to a number, or `None` if it does not denote one.
fn coerce_number(raw: &str) -> Option<f64> {
    let s = trim_whitespace(raw);
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in RADIX_PREFIXES {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            let value = digits.chars().fold(0.0_f64, |acc, c| {
                acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
            });
            return Some(value);
        }
    }

    // f64::from_str also takes "inf" and "NaN", which are not numbers here
    let decimal_chars = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_chars {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Coerces one raw path segment into a book identifier.
pub fn coerce_id(raw: &str) -> Result<BookId, IdRule> {
    // Exact path for plain integers, so large ids keep full precision
    if let Ok(exact) = trim_whitespace(raw).parse::<i64>() {
        return BookId::new(exact).ok_or(IdRule::NotPositive);
    }

    let value = coerce_number(raw).ok_or(IdRule::NotANumber)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(IdRule::NotAnInteger);
    }
    if value <= 0.0 {
        return Err(IdRule::NotPositive);
    }
    if value >= 9_223_372_036_854_775_808.0 {
        return Err(IdRule::OutOfRange);
    }
    BookId::new(value as i64).ok_or(IdRule::NotPositive)
}

/// Validates every `(name, raw)` path parameter as an identifier.
///
/// Returns the coerced identifiers in the order given.
///
/// # Errors
///
/// Returns [`ValidationError::Param`] for the first parameter that fails.
pub fn validate_params<'a, I>(params: I) -> ValidationResult<Vec<(String, BookId)>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    params
        .into_iter()
        .map(|(name, raw)| {
            coerce_id(raw)
                .map(|id| (name.to_string(), id))
                .map_err(|rule| ValidationError::Param {
                    name: name.to_string(),
                    rule,
                })
        })
        .collect()
}
