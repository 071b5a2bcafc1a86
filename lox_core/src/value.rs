use crate::utils::format_value;
use std::fmt;

/// A runtime value. Equality is structural and never coerces
/// between kinds, so `1 == "1"` is simply false
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Bool(bool),
  Nil,
  Number(f64),
  String(String),
}

impl Value {
  /// Is this value a string
  #[inline]
  pub fn is_str(&self) -> bool {
    matches!(self, Value::String(_))
  }

  /// Is this value truthy. Only `nil` and `false` are falsy, zero and
  /// the empty string are both truthy
  ///
  /// # Examples
  /// ```
  /// use lox_core::value::Value;
  ///
  /// assert!(!Value::Nil.is_truthy());
  /// assert!(!Value::Bool(false).is_truthy());
  /// assert!(Value::Number(0.0).is_truthy());
  /// assert!(Value::from("").is_truthy());
  /// ```
  #[inline]
  pub fn is_truthy(&self) -> bool {
    !matches!(self, Value::Nil | Value::Bool(false))
  }

  /// Retrieve the number if this value is one
  #[inline]
  pub fn to_num(&self) -> Option<f64> {
    match self {
      Value::Number(num) => Some(*num),
      _ => None,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bool(b) => write!(f, "{b}"),
      Self::Nil => f.write_str("nil"),
      Self::Number(num) => f.write_str(&format_value(*num)),
      Self::String(string) => f.write_str(string),
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<f64> for Value {
  fn from(num: f64) -> Self {
    Value::Number(num)
  }
}

impl From<&str> for Value {
  fn from(string: &str) -> Self {
    Value::String(string.to_string())
  }
}

impl From<String> for Value {
  fn from(string: String) -> Self {
    Value::String(string)
  }
}
