/// Formats a float as a literal that Rust and C both accept.
///
/// Magnitudes below `1e-4` or at least `1e16` use scientific notation with a signed,
/// two-digit exponent (`1e-05`, `2.5e+16`); everything else uses the shortest
/// round-trip decimal form and always carries a fractional part (`0.001`, `3.0`).
/// Non-finite values become the matching `f64` associated constant.
pub fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "f64::NAN".to_string();
    }
    if value.is_infinite() {
        let name = if value > 0.0 { "INFINITY" } else { "NEG_INFINITY" };
        return format!("f64::{}", name);
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let decimal = format!("{}", value);
    if decimal.contains('.') {
        decimal
    } else {
        format!("{}.0", decimal)
    }
}

/// Formats a float with exactly six decimals, as used for radii.
pub fn fixed_literal(value: f64) -> String {
    if !value.is_finite() {
        return float_literal(value);
    }
    format!("{:.6}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_use_two_digit_negative_exponent() {
        assert_eq!(float_literal(1e-5), "1e-05");
        assert_eq!(float_literal(2.5e-7), "2.5e-07");
        assert_eq!(float_literal(1e-12), "1e-12");
        assert_eq!(float_literal(-3e-6), "-3e-06");
    }

    #[test]
    fn moderate_values_use_decimal_form() {
        assert_eq!(float_literal(0.001), "0.001");
        assert_eq!(float_literal(0.0001), "0.0001");
        assert_eq!(float_literal(1.0), "1.0");
        assert_eq!(float_literal(42.5), "42.5");
        assert_eq!(float_literal(0.0), "0.0");
    }

    #[test]
    fn huge_values_use_positive_exponent() {
        assert_eq!(float_literal(1e16), "1e+16");
        assert_eq!(float_literal(1e15), "1000000000000000.0");
    }

    #[test]
    fn non_finite_values_use_associated_constants() {
        assert_eq!(float_literal(f64::INFINITY), "f64::INFINITY");
        assert_eq!(float_literal(f64::NEG_INFINITY), "f64::NEG_INFINITY");
        assert_eq!(float_literal(f64::NAN), "f64::NAN");
        assert_eq!(fixed_literal(f64::INFINITY), "f64::INFINITY");
    }

    #[test]
    fn fixed_literal_has_six_decimals() {
        assert_eq!(fixed_literal(2.5), "2.500000");
        assert_eq!(fixed_literal(1.0), "1.000000");
        assert_eq!(fixed_literal(0.1234567), "0.123457");
    }
}
