/// How many significant digits a non integral number is printed with
const SIGNIFICANT_DIGITS: usize = 6;

/// Render a number literal for the parse tree. Literals without a fractional
/// part, or whose fraction is only zeros, keep a single `.0`. Anything else
/// uses the shortest representation that round trips.
///
/// # Examples
/// ```
/// use lox_core::utils::format_literal;
///
/// assert_eq!(format_literal("5", 5.0), "5.0");
/// assert_eq!(format_literal("5.000", 5.0), "5.0");
/// assert_eq!(format_literal("5.250", 5.25), "5.25");
/// ```
pub fn format_literal(lexeme: &str, number: f64) -> String {
  let zero_fraction = match lexeme.split_once('.') {
    Some((_, fraction)) => fraction.chars().all(|c| c == '0'),
    None => true,
  };

  if zero_fraction {
    format!("{number:.1}")
  } else {
    trim_fraction(&number.to_string()).to_string()
  }
}

/// Render a runtime number. Integral numbers drop the decimal point,
/// everything else is printed with six significant digits.
///
/// # Examples
/// ```
/// use lox_core::utils::format_value;
///
/// assert_eq!(format_value(7.0), "7");
/// assert_eq!(format_value(2.5), "2.5");
/// assert_eq!(format_value(1.0 / 3.0), "0.333333");
/// ```
pub fn format_value(number: f64) -> String {
  if !number.is_finite() || number.fract() == 0.0 {
    return number.to_string();
  }

  // let the scientific formatter do the rounding so the exponent
  // reflects any carry into the next decade
  let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, number);
  let (mantissa, exponent) = match scientific.split_once('e') {
    Some((mantissa, exponent)) => match exponent.parse::<i32>() {
      Ok(exponent) => (mantissa, exponent),
      Err(_) => return number.to_string(),
    },
    None => return number.to_string(),
  };

  if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
  } else {
    let precision = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
    trim_fraction(&format!("{number:.precision$}")).to_string()
  }
}

/// Strip trailing zeros, and a dangling point, from a decimal string
fn trim_fraction(decimal: &str) -> &str {
  if !decimal.contains('.') {
    return decimal;
  }

  decimal.trim_end_matches('0').trim_end_matches('.')
}
