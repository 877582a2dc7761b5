/// Significant digits kept when displaying a computed value.
const DISPLAY_DIGITS: usize = 15;

/// Format a number for display.
///
/// Results are rounded to 15 significant digits, so accumulated binary
/// rounding error (`26.599999999999998`) displays as `26.6`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        let rounded = format!("{:.*e}", DISPLAY_DIGITS - 1, n)
            .parse::<f64>()
            .unwrap_or(n);
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-54.0), "-54");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_fractions_are_shortest_form() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(4.2), "4.2");
        assert_eq!(format_number(26.599999999999998), "26.6");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_non_finite_markers() {
        assert_eq!(format_number(f64::NAN), "#NAN!");
        assert_eq!(format_number(f64::INFINITY), "#INF!");
    }
}
