//! Statically declared field constraints
//!
//! Each rule inspects one raw JSON value and appends a message for every
//! constraint it violates. A rule returns the normalized value only when it
//! appended nothing.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Letters (ASCII plus Latin-1 accented range), single whitespace between words.
const AUTHOR_NAME_PATTERN: &str = r"^[A-Za-zÀ-ÿ]+(?:\s[A-Za-zÀ-ÿ]+)*$";

static AUTHOR_NAME: OnceLock<Regex> = OnceLock::new();

fn is_author_name(value: &str) -> bool {
    AUTHOR_NAME
        .get_or_init(|| Regex::new(AUTHOR_NAME_PATTERN).expect("author pattern is valid"))
        .is_match(value)
}

/// Pattern constraint on a string field
#[derive(Clone, Copy)]
pub struct PatternRule {
    pub matches: fn(&str) -> bool,
    pub message: &'static str,
}

/// Strips surrounding whitespace, including the byte order mark.
pub(super) fn trim_whitespace(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Length in UTF-16 code units, so astral characters count twice.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Constraints on a trimmed string field
#[derive(Clone, Copy)]
pub struct StringRule {
    /// Capitalized field name used in messages
    pub label: &'static str,
    /// Inclusive, in UTF-16 code units after trimming
    pub min_len: usize,
    /// Inclusive, in UTF-16 code units after trimming
    pub max_len: usize,
    pub pattern: Option<PatternRule>,
}

impl StringRule {
    /// Checks `raw`, returning the trimmed value if every constraint holds.
    pub fn check(&self, raw: Option<&Value>, violations: &mut Vec<String>) -> Option<String> {
        let value = match raw {
            None => {
                violations.push(format!("{} is required", self.label));
                return None;
            }
            Some(Value::String(s)) => trim_whitespace(s),
            Some(_) => {
                violations.push(format!("{} must be a string", self.label));
                return None;
            }
        };

        let before = violations.len();
        let len = utf16_len(value);

        if len < self.min_len {
            violations.push(format!(
                "{} must be at least {} characters",
                self.label, self.min_len
            ));
        }
        if len > self.max_len {
            violations.push(format!(
                "{} must not exceed {} characters",
                self.label, self.max_len
            ));
        }
        if let Some(pattern) = &self.pattern {
            if !(pattern.matches)(value) {
                violations.push(pattern.message.to_string());
            }
        }

        (violations.len() == before).then(|| value.to_string())
    }
}

/// Constraints on a strictly positive integer field
#[derive(Debug, Clone, Copy)]
pub struct PositiveIntRule {
    pub label: &'static str,
}

impl PositiveIntRule {
    /// Checks `raw`, returning the integer if it is a positive whole number.
    ///
    /// Integral floats such as `1967.0` are accepted. Integral values that do
    /// not fit in an `i64` are reported as not an integer.
    pub fn check(&self, raw: Option<&Value>, violations: &mut Vec<String>) -> Option<i64> {
        let number = match raw {
            None => {
                violations.push(format!("{} is required", self.label));
                return None;
            }
            Some(Value::Number(n)) => n,
            Some(_) => {
                violations.push(format!("{} must be a number", self.label));
                return None;
            }
        };

        let (integer, positive) = match number.as_i64() {
            Some(i) => (Some(i), i > 0),
            None => {
                let f = number.as_f64().unwrap_or(f64::NAN);
                (float_to_i64(f), f > 0.0)
            }
        };

        let before = violations.len();
        if integer.is_none() {
            violations.push(format!("{} must be an integer", self.label));
        }
        if !positive {
            violations.push(format!("{} must be a positive integer", self.label));
        }

        if violations.len() == before {
            integer
        } else {
            None
        }
    }
}

/// Converts an integral, in-range float to `i64`.
fn float_to_i64(f: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.is_finite() && f.fract() == 0.0 && f >= -BOUND && f < BOUND).then_some(f as i64)
}

pub const TITLE: StringRule = StringRule {
    label: "Title",
    min_len: 2,
    max_len: 100,
    pattern: None,
};

pub const AUTHOR: StringRule = StringRule {
    label: "Author",
    min_len: 2,
    max_len: 50,
    pattern: Some(PatternRule {
        matches: is_author_name,
        message: "Author can only contain letters",
    }),
};

pub const YEAR: PositiveIntRule = PositiveIntRule { label: "Year" };
