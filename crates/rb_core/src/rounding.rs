//! Percent rounding and number display.
//!
//! Fractions live in `[0, 1]` at rest. Everything user-visible is either a
//! whole-number percentage (`round(fraction * 100)`, half rounds up) or a raw
//! number printed in its shortest form (`4` not `4.0`).

/// Round to the nearest integer, halves toward +∞ (`2.5 → 3`, `-2.5 → -2`).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Whole-number percentage of a fraction: `0.823 → 82`.
#[inline]
pub fn to_percent(fraction: f64) -> i64 {
    round_half_up(fraction * 100.0) as i64
}

/// `to_percent` with a trailing `%`.
pub fn percent_label(fraction: f64) -> String {
    format!("{}%", to_percent(fraction))
}

/// Clamp a fraction into `[0, 1]`. NaN passes through.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Shortest display of a raw artifact number, in the browser's number-to-text
/// form: `4` not `4.0`, and exponents outside `[1e-7, 1e21)` as `1e-7`, `1e+21`.
pub fn display_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let sign = if x < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits: `1.2345e4`, `5e-7`.
    let sci = format!("{:e}", x.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{x}");
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return format!("{x}");
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digit string.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let e_sign = if n - 1 < 0 { '-' } else { '+' };
        let e = (n - 1).abs();
        if rest.is_empty() {
            format!("{lead}e{e_sign}{e}")
        } else {
            format!("{lead}.{rest}e{e_sign}{e}")
        }
    };
    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(to_percent(0.823), 82);
        assert_eq!(to_percent(0.825), 83);
        assert_eq!(to_percent(0.0), 0);
        assert_eq!(to_percent(1.0), 100);
        assert_eq!(percent_label(0.5), "50%");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(79.4), 79.0);
    }

    #[test]
    fn donut_average_of_point_nine_and_point_seven_is_eighty() {
        assert_eq!(to_percent((0.9 + 0.7) / 2.0), 80);
    }

    #[test]
    fn clamp_keeps_unit_interval() {
        assert_eq!(clamp_unit(1.4), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert!(clamp_unit(f64::NAN).is_nan());
    }

    #[test]
    fn numbers_print_shortest() {
        assert_eq!(display_number(4.0), "4");
        assert_eq!(display_number(12.345), "12.345");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(82.3), "82.3");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(-3.0), "-3");
        assert_eq!(display_number(0.5), "0.5");
        assert_eq!(display_number(1200.0), "1200");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(1e-7), "1e-7");
        assert_eq!(display_number(-2.5e-8), "-2.5e-8");
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(1e22), "1e+22");
        assert_eq!(display_number(123456789012345680000.0), "123456789012345680000");
        assert_eq!(display_number(f64::INFINITY), "Infinity");
    }
}
