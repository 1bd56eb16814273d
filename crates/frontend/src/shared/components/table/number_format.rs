//! Number formatting for tables and cards (French conventions)

/// Thousands separator: narrow no-break space
const THOUSANDS: char = '\u{202f}';

/// Formats a number with a thousands separator and a decimal comma
///
/// # Examples
///
/// ```
/// use pharmacy_frontend::shared::components::table::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1\u{202f}234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }

    let formatted = format!("{:.prec$}", value, prec = decimals.min(3) as usize);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS);
        }
        grouped.push(c);
    }

    // "-0" after rounding
    let sign = if grouped.chars().all(|c| c == '0' || c == THOUSANDS)
        && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Amount in euros with 2 decimals
pub fn format_money(value: f64) -> String {
    format!("{}\u{a0}€", format_number_with_decimals(value, 2))
}

/// Integer with thousands separator
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Percentage with 1 decimal
pub fn format_percent(value: f64) -> String {
    format!("{}\u{a0}%", format_number_with_decimals(value, 1))
}

/// Number of days, `—` when unknown
pub fn format_days(value: Option<f64>) -> String {
    match value {
        Some(days) => format!("{}\u{a0}j", format_number_with_decimals(days, 0)),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1\u{202f}234,56\u{a0}€");
        assert_eq!(format_money(1234567.89), "1\u{202f}234\u{202f}567,89\u{a0}€");
        assert_eq!(format_money(0.0), "0,00\u{a0}€");
        assert_eq!(format_money(-1234.56), "-1\u{202f}234,56\u{a0}€");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1\u{202f}235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1\u{202f}234,6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1\u{202f}234,567");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0,00");
        assert_eq!(format_number_with_decimals(f64::NAN, 2), "—");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1\u{202f}234\u{202f}567");
        assert_eq!(format_number_int(0.0), "0");
        assert_eq!(format_number_int(-1234.0), "-1\u{202f}234");
        assert_eq!(format_number_int(999.0), "999");
    }

    #[test]
    fn test_format_percent_and_days() {
        assert_eq!(format_percent(32.46), "32,5\u{a0}%");
        assert_eq!(format_days(Some(12.4)), "12\u{a0}j");
        assert_eq!(format_days(None), "—");
    }
}
