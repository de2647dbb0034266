//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::{GstError, GstResult};

/// Validate that a taxable value is not negative
///
/// Credit notes and returns must be raised as their own documents; a negative
/// value is never silently negated.
pub fn validate_non_negative_amount(amount: &BigDecimal) -> GstResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(GstError::NegativeTaxableValue(amount.clone()))
    } else {
        Ok(())
    }
}

/// Whether `s` is non-empty and made only of ASCII digits
pub fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Lowercased alphanumeric words of `text`, in order
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amount_rejected() {
        let amount: BigDecimal = "-0.01".parse().unwrap();
        assert!(matches!(
            validate_non_negative_amount(&amount),
            Err(GstError::NegativeTaxableValue(_))
        ));
        assert!(validate_non_negative_amount(&BigDecimal::from(0)).is_ok());
    }

    #[test]
    fn test_ascii_digits() {
        assert!(is_ascii_digits("0401"));
        assert!(!is_ascii_digits(""));
        assert!(!is_ascii_digits("04a1"));
    }

    #[test]
    fn test_words() {
        assert_eq!(
            words("Amul Toned-Milk 500ml"),
            vec!["amul", "toned", "milk", "500ml"]
        );
    }
}
