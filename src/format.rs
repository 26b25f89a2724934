//! Display formatting for metric cards and reports (en-US conventions).

/// Thousands-grouped integer, e.g. `24567` -> `"24,567"`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar currency, e.g. `847352` -> `"$847,352"`.
pub fn format_currency(value: u64) -> String {
    format!("${}", format_number(value))
}

/// One-decimal percent, e.g. `23.4` -> `"23.4%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// One-decimal percent with an explicit sign on positive values,
/// e.g. `12.34` -> `"+12.3%"`, `-2.1` -> `"-2.1%"`.
pub fn signed_percentage(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(24567), "24,567");
        assert_eq!(format_number(847352), "847,352");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(847352), "$847,352");
        assert_eq!(format_currency(0), "$0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(23.4), "23.4%");
        assert_eq!(format_percentage(23.449), "23.4%");
        assert_eq!(format_percentage(-2.1), "-2.1%");
    }

    #[test]
    fn test_signed_percentage() {
        assert_eq!(signed_percentage(12.34), "+12.3%");
        assert_eq!(signed_percentage(-2.1), "-2.1%");
        assert_eq!(signed_percentage(0.0), "0.0%");
    }
}
