use crate::models::item::coerce_amount;
use crate::split::constants::{CURRENCY_PREFIX, DECIMAL_SEPARATOR, THOUSANDS_SEPARATOR};

/// Parse a user-entered amount.
///
/// Accepts plain numbers (`20000`, `20000.5`), id-ID grouping (`20.000`,
/// `1.250.000,50`) and an optional `Rp`/`IDR` prefix. Blank, unparsable,
/// non-finite and negative input all yield `0.0`.
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    let without_prefix = strip_currency_prefix(trimmed);

    let compact: String = without_prefix
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '\u{a0}')
        .collect();

    if compact.is_empty() {
        return 0.0;
    }

    let normalized = if compact.contains(DECIMAL_SEPARATOR) {
        compact
            .replace(THOUSANDS_SEPARATOR, "")
            .replace(DECIMAL_SEPARATOR, ".")
    } else if is_thousands_grouped(&compact) {
        compact.replace(THOUSANDS_SEPARATOR, "")
    } else {
        compact
    };

    normalized.parse::<f64>().map(coerce_amount).unwrap_or(0.0)
}

fn strip_currency_prefix(s: &str) -> &str {
    for prefix in [CURRENCY_PREFIX, "IDR"] {
        if let Some(head) = s.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return s[prefix.len()..].trim_start_matches('.');
            }
        }
    }
    s
}

/// `1.250.000` style: leading group of 1-3 digits, then groups of exactly 3.
fn is_thousands_grouped(s: &str) -> bool {
    let mut groups = s.split(THOUSANDS_SEPARATOR);
    let Some(first) = groups.next() else {
        return false;
    };
    let rest: Vec<&str> = groups.collect();

    !rest.is_empty()
        && (1..=3).contains(&first.len())
        && first.chars().all(|c| c.is_ascii_digit())
        && rest
            .iter()
            .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// Format an amount as Rupiah with no fractional digits, e.g. `Rp 20.000`.
pub fn format_rupiah(value: f64) -> String {
    let digits = format_grouped(value.abs());
    let rounded_is_zero = digits == "0";
    if value < 0.0 && !rounded_is_zero {
        format!("-{} {}", CURRENCY_PREFIX, digits)
    } else {
        format!("{} {}", CURRENCY_PREFIX, digits)
    }
}

/// Like [`format_rupiah`] but without the currency prefix.
pub fn format_plain(value: f64) -> String {
    let digits = format_grouped(value.abs());
    if value < 0.0 && digits != "0" {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Format an amount as editable text that [`parse_amount`] reads back unchanged.
///
/// No grouping, and a decimal comma so `20.125` is not taken for twenty thousand.
/// Zero and invalid amounts give an empty string.
pub fn format_amount_input(value: f64) -> String {
    let value = coerce_amount(value);
    if value == 0.0 {
        return String::new();
    }
    format!("{}", value).replace('.', &DECIMAL_SEPARATOR.to_string())
}

/// Format a percentage with a fixed number of decimals, e.g. `66.7%`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    // Half away from zero, matching Intl.NumberFormat.
    let whole = format!("{:.0}", value.round());
    let bytes = whole.as_bytes();
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);

    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(*b as char);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("20000"), 20000.0);
        assert_eq!(parse_amount("  20000.5 "), 20000.5);
        assert_eq!(parse_amount("0"), 0.0);
    }

    #[test]
    fn test_parse_locale_grouping() {
        assert_eq!(parse_amount("20.000"), 20000.0);
        assert_eq!(parse_amount("1.250.000"), 1250000.0);
        assert_eq!(parse_amount("1.250.000,50"), 1250000.5);
        assert_eq!(parse_amount("12,5"), 12.5);
        assert_eq!(parse_amount("Rp 33.000"), 33000.0);
        assert_eq!(parse_amount("rp33000"), 33000.0);
        assert_eq!(parse_amount("IDR 1_000"), 1000.0);
    }

    #[test]
    fn test_parse_invalid_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-5000"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(999.0), "Rp 999");
        assert_eq!(format_rupiah(20000.0), "Rp 20.000");
        assert_eq!(format_rupiah(1250000.0), "Rp 1.250.000");
        assert_eq!(format_rupiah(6666.5), "Rp 6.667");
        assert_eq!(format_rupiah(-3000.0), "-Rp 3.000");
        assert_eq!(format_rupiah(-0.2), "Rp 0");
    }

    #[test]
    fn test_amount_input_reads_back_unchanged() {
        for value in [20.125, 12.345, 999.999, 1.5, 7.25, 20000.0, 1250000.5, 0.001] {
            let text = format_amount_input(value);
            assert_eq!(parse_amount(&text), value, "input text {:?}", text);
        }
        assert_eq!(format_amount_input(20.125), "20,125");
        assert_eq!(format_amount_input(20000.0), "20000");
        assert_eq!(format_amount_input(0.0), "");
        assert_eq!(format_amount_input(f64::NAN), "");
    }

    #[test]
    fn test_format_plain_and_percentage() {
        assert_eq!(format_plain(22000.0), "22.000");
        assert_eq!(format_percentage(66.6666, 0), "67%");
        assert_eq!(format_percentage(10.0, 1), "10.0%");
    }
}
