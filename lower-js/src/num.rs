use core::hash::Hash;
use core::hash::Hasher;
use num_bigint::BigInt;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// Largest integer below which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  // Integral values are written without a fractional part, as JSON.stringify would.
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let v = self.0;
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER && !(v == 0.0 && v.is_sign_negative()) {
      serializer.serialize_i64(v as i64)
    } else {
      serializer.serialize_f64(v)
    }
  }
}

fn strip_separators(digits: &str) -> Option<String> {
  let mut out = String::with_capacity(digits.len());
  let mut prev_sep = false;
  let mut saw_digit = false;
  for ch in digits.chars() {
    if ch == '_' {
      // Separators must be sandwiched between digits.
      if prev_sep || !saw_digit {
        return None;
      }
      prev_sep = true;
      continue;
    }
    out.push(ch);
    saw_digit = ch.is_ascii_alphanumeric();
    prev_sep = false;
  }
  if prev_sep {
    return None;
  }
  Some(out)
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
  if digits.is_empty() {
    return None;
  }
  let mut value = 0f64;
  for ch in digits.chars() {
    value = value * radix as f64 + ch.to_digit(radix)? as f64;
  }
  Some(value)
}

fn split_radix_prefix(raw: &str) -> (u32, &str) {
  let lower = |p: &str| raw.get(..2).is_some_and(|h| h.eq_ignore_ascii_case(p));
  if lower("0x") {
    (16, &raw[2..])
  } else if lower("0o") {
    (8, &raw[2..])
  } else if lower("0b") {
    (2, &raw[2..])
  } else {
    (10, raw)
  }
}

impl JsNumber {
  /// Decodes the source text of a NumericLiteral token (without a BigInt suffix).
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    let (radix, body) = split_radix_prefix(raw);
    let digits = strip_separators(body)?;
    if radix != 10 {
      return parse_radix(&digits, radix).map(JsNumber);
    }
    // Legacy octal (`017`), unless a digit rules it out (`019` is decimal).
    if digits.len() > 1
      && digits.starts_with('0')
      && digits.chars().all(|c| c.is_ascii_digit())
    {
      if digits.chars().all(|c| ('0'..='7').contains(&c)) {
        return parse_radix(&digits, 8).map(JsNumber);
      }
      return digits.parse::<f64>().ok().map(JsNumber);
    }
    digits.parse::<f64>().ok().map(JsNumber)
  }
}

/// Canonicalises a BigInt literal such as `0x1F_ffn` into its decimal digits (without the `n`).
pub fn normalise_literal_bigint(raw: &str) -> Option<String> {
  let body = raw.strip_suffix('n')?;
  let (radix, digits) = split_radix_prefix(body);
  let digits = strip_separators(digits)?;
  if digits.is_empty() {
    return None;
  }
  if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
    // Decimal BigInt literals cannot use a leading zero.
    return None;
  }
  let value = BigInt::parse_bytes(digits.as_bytes(), radix)?;
  Some(value.to_str_radix(10))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn num(raw: &str) -> f64 {
    JsNumber::from_literal(raw).unwrap().0
  }

  #[test]
  fn decodes_numeric_literal_forms() {
    assert_eq!(num("42"), 42.0);
    assert_eq!(num("1_000"), 1000.0);
    assert_eq!(num("0x1F"), 31.0);
    assert_eq!(num("0O17"), 15.0);
    assert_eq!(num("0b101"), 5.0);
    assert_eq!(num("017"), 15.0);
    assert_eq!(num("019"), 19.0);
    assert_eq!(num("1.5e3"), 1500.0);
    assert_eq!(num(".5"), 0.5);
    assert_eq!(num("5."), 5.0);
  }

  #[test]
  fn rejects_misplaced_separators() {
    assert!(JsNumber::from_literal("1__0").is_none());
    assert!(JsNumber::from_literal("10_").is_none());
    assert!(JsNumber::from_literal("0x").is_none());
  }

  #[test]
  fn normalises_bigint() {
    assert_eq!(normalise_literal_bigint("10n").as_deref(), Some("10"));
    assert_eq!(normalise_literal_bigint("0xffn").as_deref(), Some("255"));
    assert_eq!(normalise_literal_bigint("1_0n").as_deref(), Some("10"));
    assert_eq!(normalise_literal_bigint("01n"), None);
    assert_eq!(normalise_literal_bigint("10"), None);
  }

  #[test]
  fn integral_numbers_serialize_without_fraction() {
    assert_eq!(serde_json::to_string(&JsNumber(3.0)).unwrap(), "3");
    assert_eq!(serde_json::to_string(&JsNumber(0.25)).unwrap(), "0.25");
  }
}
