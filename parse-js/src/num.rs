use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  /// Parses the source text of a numeric literal token, including numeric separators, radix
  /// prefixes and legacy octal literals.
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    let clean = raw.replace('_', "");
    let radix = match clean.get(..2) {
      Some("0x" | "0X") => 16,
      Some("0o" | "0O") => 8,
      Some("0b" | "0B") => 2,
      _ => 10,
    };
    if radix != 10 {
      return parse_radix_digits(&clean[2..], radix);
    };
    let legacy_octal =
      clean.len() > 1 && clean.starts_with('0') && clean.bytes().all(|b| b.is_ascii_digit());
    if legacy_octal {
      if clean.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return parse_radix_digits(&clean[1..], 8);
      };
      // Legacy "non-octal decimal" such as `089`.
      return clean.parse::<f64>().ok().map(JsNumber);
    };
    clean.parse::<f64>().ok().map(JsNumber)
  }
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<JsNumber> {
  if digits.is_empty() {
    return None;
  };
  let mut value = 0f64;
  for c in digits.chars() {
    value = value * radix as f64 + c.to_digit(radix)? as f64;
  }
  Some(JsNumber(value))
}

/// Formats like JavaScript's `Number.prototype.toString()` with radix 10.
impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let v = self.0;
    if v.is_nan() {
      return write!(f, "NaN");
    };
    if v == 0.0 {
      return write!(f, "0");
    };
    if v.is_infinite() {
      return write!(f, "{}", if v < 0.0 { "-Infinity" } else { "Infinity" });
    };
    if v < 0.0 {
      write!(f, "-")?;
    };
    // Rust's exponent formatting yields the shortest round-tripping digits.
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i64;
    let n = exp.parse::<i64>().unwrap_or(0) + 1;
    if k <= n && n <= 21 {
      write!(f, "{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
      let (int, frac) = digits.split_at(n as usize);
      write!(f, "{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
      write!(f, "0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
      let e = n - 1;
      let sign = if e < 0 { '-' } else { '+' };
      let (first, rest) = digits.split_at(1);
      if rest.is_empty() {
        write!(f, "{}e{}{}", first, sign, e.abs())
      } else {
        write!(f, "{}.{}e{}{}", first, rest, sign, e.abs())
      }
    }
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

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::JsNumber;

  fn lit(raw: &str) -> f64 {
    JsNumber::from_literal(raw).unwrap().0
  }

  #[test]
  fn parses_literal_forms() {
    assert_eq!(lit("0"), 0.0);
    assert_eq!(lit("1_000_000"), 1_000_000.0);
    assert_eq!(lit("0xff"), 255.0);
    assert_eq!(lit("0B101"), 5.0);
    assert_eq!(lit("0o17"), 15.0);
    assert_eq!(lit("017"), 15.0);
    assert_eq!(lit("089"), 89.0);
    assert_eq!(lit(".5"), 0.5);
    assert_eq!(lit("5."), 5.0);
    assert_eq!(lit("1e3"), 1000.0);
    assert!(JsNumber::from_literal("0x").is_none());
  }

  #[test]
  fn formats_like_javascript() {
    let cases = [
      (0.0, "0"),
      (1.0, "1"),
      (-2.5, "-2.5"),
      (100.0, "100"),
      (0.1, "0.1"),
      (0.000001, "0.000001"),
      (0.0000001, "1e-7"),
      (1e21, "1e+21"),
      (123456789012345680000.0, "123456789012345680000"),
      (1.5e300, "1.5e+300"),
      (f64::INFINITY, "Infinity"),
      (f64::NAN, "NaN"),
    ];
    for (value, expected) in cases {
      assert_eq!(JsNumber(value).to_string(), expected, "formatting {value}");
    }
  }
}
