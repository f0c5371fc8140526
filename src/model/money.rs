use std::fmt::{Display, Formatter};

use serde_json::Value;

/// Two-decimal monetary amount held as integer minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self { Money(cents) }

    pub fn cents(&self) -> i64 { self.0 }

    /// Parse a JSON scalar: integers, floats, or numeric strings such as `"1,250.5"`.
    pub fn from_json(v: &Value) -> Option<Self> {
        match v {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return i.checked_mul(100).map(Money);
                }
                n.as_f64().and_then(Self::from_f64)
            }
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let cents = (f * 100.0).round();
        if cents.abs() > i64::MAX as f64 { None } else { Some(Money(cents as i64)) }
    }

    /// Decimal text to minor units, rounding half away from zero past two places.
    pub fn parse(raw: &str) -> Option<Self> {
        let s: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
        if s.is_empty() {
            return None;
        }
        let (neg, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(&s)),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let whole: i64 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
        let mut digits = frac_part.bytes().map(|b| (b - b'0') as i64);
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);
        let mut cents = whole.checked_mul(100)?.checked_add(tenths * 10 + hundredths)?;
        if round_up {
            cents = cents.checked_add(1)?;
        }
        Some(Money(if neg { -cents } else { cents }))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_strings() {
        assert_eq!(Money::from_json(&json!(500)), Some(Money::from_cents(50_000)));
        assert_eq!(Money::from_json(&json!(12.5)), Some(Money::from_cents(1_250)));
        assert_eq!(Money::from_json(&json!("1,250.5")), Some(Money::from_cents(125_050)));
        assert_eq!(Money::from_json(&json!(" 0.07 ")), Some(Money::from_cents(7)));
        assert_eq!(Money::from_json(&json!("-3.10")), Some(Money::from_cents(-310)));
        assert_eq!(Money::from_json(&json!(".5")), Some(Money::from_cents(50)));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Money::parse("1.005"), Some(Money::from_cents(101)));
        assert_eq!(Money::parse("1.004"), Some(Money::from_cents(100)));
        assert_eq!(Money::parse("-1.005"), Some(Money::from_cents(-101)));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("12a"), None);
        assert_eq!(Money::parse("1.2.3"), None);
        assert_eq!(Money::from_json(&json!(null)), None);
        assert_eq!(Money::from_json(&json!([1])), None);
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Money::from_cents(125_050).to_string(), "1250.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-310).to_string(), "-3.10");
        assert_eq!(Money::ZERO.to_string(), "0.00");
        // display text parses back to the same amount
        assert_eq!(Money::parse(&Money::from_cents(-5).to_string()), Some(Money::from_cents(-5)));
    }
}
