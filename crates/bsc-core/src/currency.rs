//! Money formatting for insight messages
//!
//! Renders amounts the way an en-US locale does ("$1,234.50"). This is
//! formatting only; amounts are never converted between currencies.

use crate::error::Result;
use crate::validate::normalize_currency;

/// Symbol and number of minor digits for well-known codes
fn currency_style(code: &str) -> (Option<&'static str>, usize) {
    match code {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        "INR" => (Some("₹"), 2),
        "CAD" => (Some("CA$"), 2),
        "AUD" => (Some("A$"), 2),
        "NZD" => (Some("NZ$"), 2),
        "MXN" => (Some("MX$"), 2),
        "BRL" => (Some("R$"), 2),
        "CNY" => (Some("CN¥"), 2),
        "KRW" => (Some("₩"), 0),
        _ => (None, 2),
    }
}

/// Insert thousands separators into a string of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an amount in the given currency
pub fn format_money(amount: f64, currency: &str) -> Result<String> {
    let code = normalize_currency(currency)?;
    let (symbol, decimals) = currency_style(&code);

    let fixed = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut number = group_thousands(int_part);
    if let Some(frac) = frac_part {
        number.push('.');
        number.push_str(frac);
    }

    // "-0.00" should not be printed for tiny negatives that round to zero
    let negative = amount < 0.0 && number.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    Ok(match symbol {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, code, number),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_formatting() {
        assert_eq!(format_money(2500.0, "USD").unwrap(), "$2,500.00");
        assert_eq!(format_money(0.5, "usd").unwrap(), "$0.50");
        assert_eq!(format_money(1234567.891, "USD").unwrap(), "$1,234,567.89");
        assert_eq!(format_money(999.0, "USD").unwrap(), "$999.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_money(-45.5, "USD").unwrap(), "-$45.50");
        assert_eq!(format_money(-0.001, "USD").unwrap(), "$0.00");
    }

    #[test]
    fn test_other_currencies() {
        assert_eq!(format_money(1000.0, "EUR").unwrap(), "€1,000.00");
        assert_eq!(format_money(1500.4, "JPY").unwrap(), "¥1,500");
        assert_eq!(format_money(10.0, "CHF").unwrap(), "CHF 10.00");
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert!(format_money(10.0, "DOLLARS").is_err());
    }
}
