//! Exact conversion between human amounts and token base units.
//!
//! Works on decimal strings so no precision is lost to floating point.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount: {0}")]
    Invalid(String),

    #[error("too many decimal places (max {decimals})")]
    TooPrecise { decimals: u8 },
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_leading_zeros(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `"1.5"` with 6 decimals becomes `"1500000"`.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<String, UnitsError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::Invalid(amount.to_string()));
    }
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooPrecise { decimals });
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(decimals as usize - fraction.len()));

    Ok(strip_leading_zeros(&digits))
}

/// `"1500000"` with 6 decimals becomes `"1.5"`.
pub fn from_base_units(raw: &str, decimals: u8) -> Result<String, UnitsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UnitsError::Empty);
    }
    if !all_digits(raw) {
        return Err(UnitsError::Invalid(raw.to_string()));
    }

    let decimals = decimals as usize;
    let padded = format!("{:0>width$}", raw, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);

    let whole = strip_leading_zeros(whole);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        Ok(whole)
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units("1.5", 6).unwrap(), "1500000");
        assert_eq!(to_base_units("0.01", 18).unwrap(), "10000000000000000");
        assert_eq!(to_base_units("42", 0).unwrap(), "42");
        assert_eq!(to_base_units(".5", 2).unwrap(), "50");
        assert_eq!(to_base_units("5.", 2).unwrap(), "500");
        assert_eq!(to_base_units("0", 6).unwrap(), "0");
        assert_eq!(to_base_units("000.000", 6).unwrap(), "0");
    }

    #[test]
    fn test_to_base_units_is_exact() {
        // 0.1 + 0.2 style float error would show up here.
        assert_eq!(to_base_units("0.3", 18).unwrap(), "300000000000000000");
        assert_eq!(
            to_base_units("123456789.123456789123456789", 18).unwrap(),
            "123456789123456789123456789"
        );
    }

    #[test]
    fn test_to_base_units_rejects() {
        assert_eq!(to_base_units("", 6), Err(UnitsError::Empty));
        assert_eq!(to_base_units("1.2345678", 6), Err(UnitsError::TooPrecise { decimals: 6 }));
        assert!(matches!(to_base_units("1e5", 6), Err(UnitsError::Invalid(_))));
        assert!(matches!(to_base_units("-1", 6), Err(UnitsError::Invalid(_))));
        assert!(matches!(to_base_units("1.2.3", 6), Err(UnitsError::Invalid(_))));
        assert!(matches!(to_base_units(".", 6), Err(UnitsError::Invalid(_))));
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(from_base_units("1500000", 6).unwrap(), "1.5");
        assert_eq!(from_base_units("1", 6).unwrap(), "0.000001");
        assert_eq!(from_base_units("0", 18).unwrap(), "0");
        assert_eq!(from_base_units("2000000", 6).unwrap(), "2");
        assert_eq!(from_base_units("42", 0).unwrap(), "42");
        assert!(from_base_units("0x10", 6).is_err());
    }
}
