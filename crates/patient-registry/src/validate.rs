//! Input validation for patient fields.
//!
//! Format checks only: uniqueness of email is enforced by the store at
//! write time, not here. All functions are pure and side-effect-free, so
//! a form layer can mirror them before ever touching the store.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::PatientFields;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// True iff `s` has a `local-part@domain.tld` shape with a final label of
/// at least two letters. No deliverability check.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// True iff `s` is an optional leading `+` followed by exactly 10-15
/// decimal digits. No separators, spaces, or parentheses.
pub fn is_valid_phone(s: &str) -> bool {
    PHONE_RE.is_match(s)
}

/// Field-level validation errors. Always user-correctable; raised before
/// any store call and never logged as a system fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("first name is required")]
    MissingFirstName,

    #[error("last name is required")]
    MissingLastName,

    #[error("email is required")]
    MissingEmail,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("phone must be 10-15 digits with an optional leading '+'")]
    InvalidPhone,

    #[error("date of entry is required")]
    MissingDateOfEntry,
}

/// Check every field of a form submission, returning all problems found
/// so the caller can surface them together. An empty vec means the fields
/// are fit to hand to the store.
pub fn validate_fields(fields: &PatientFields) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if fields.first_name.trim().is_empty() {
        errors.push(ValidationError::MissingFirstName);
    }
    if fields.last_name.trim().is_empty() {
        errors.push(ValidationError::MissingLastName);
    }

    let email = fields.email.trim();
    if email.is_empty() {
        errors.push(ValidationError::MissingEmail);
    } else if !is_valid_email(email) {
        errors.push(ValidationError::InvalidEmail);
    }

    // Phone is optional; only format-checked when present.
    if let Some(phone) = fields.phone.as_deref() {
        let phone = phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.push(ValidationError::InvalidPhone);
        }
    }

    if fields.date_of_entry.trim().is_empty() {
        errors.push(ValidationError::MissingDateOfEntry);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "a@b.co",
            "first.last@example.com",
            "user+tag@mail.example.org",
            "x_%99@sub.domain.io",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plainaddress",
            "missing-at.example.com",
            "user@domain",
            "user@domain.c",
            "user@domain.c1",
            "two@@example.com",
            "user@example.com extra",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("0123456789"));
        assert!(is_valid_phone("+441234567890"));
        assert!(is_valid_phone("123456789012345"));
    }

    #[test]
    fn test_invalid_phones() {
        for phone in [
            "",
            "123456789",          // 9 digits
            "1234567890123456",   // 16 digits
            "++1234567890",
            "123-456-7890",
            "12345 67890",
            "(123)4567890",
            "1234567890+",
        ] {
            assert!(!is_valid_phone(phone), "{phone} should be invalid");
        }
    }

    fn fields_ok() -> PatientFields {
        PatientFields {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            address: None,
            email: "ada@example.com".into(),
            phone: None,
            date_of_birth: None,
            date_of_entry: "2026-08-23".into(),
        }
    }

    #[test]
    fn test_validate_fields_accepts_complete_input() {
        assert!(validate_fields(&fields_ok()).is_empty());
    }

    #[test]
    fn test_validate_fields_collects_all_errors() {
        let fields = PatientFields {
            first_name: "  ".into(),
            last_name: "".into(),
            address: None,
            email: "not-an-email".into(),
            phone: Some("12-34".into()),
            date_of_birth: None,
            date_of_entry: "".into(),
        };
        let errors = validate_fields(&fields);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingFirstName,
                ValidationError::MissingLastName,
                ValidationError::InvalidEmail,
                ValidationError::InvalidPhone,
                ValidationError::MissingDateOfEntry,
            ]
        );
    }

    #[test]
    fn test_validate_fields_empty_phone_is_ok() {
        let mut fields = fields_ok();
        fields.phone = Some("".into());
        assert!(validate_fields(&fields).is_empty());
    }

    proptest! {
        #[test]
        fn prop_digit_strings_in_range_are_valid_phones(
            digits in proptest::collection::vec(0u8..10, 10..=15),
            plus in any::<bool>(),
        ) {
            let mut s = String::new();
            if plus {
                s.push('+');
            }
            for d in digits {
                s.push(char::from(b'0' + d));
            }
            prop_assert!(is_valid_phone(&s));
        }

        #[test]
        fn prop_out_of_range_digit_strings_are_invalid_phones(
            digits in proptest::collection::vec(0u8..10, 1..10usize),
        ) {
            let s: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            prop_assert!(!is_valid_phone(&s));
        }

        #[test]
        fn prop_separators_invalidate_phones(
            head in proptest::collection::vec(0u8..10, 5..=7),
            tail in proptest::collection::vec(0u8..10, 5..=8),
            sep in prop::sample::select(vec![' ', '-', '.', '(', ')']),
        ) {
            let mut s: String = head.iter().map(|d| char::from(b'0' + d)).collect();
            s.push(sep);
            s.extend(tail.iter().map(|d| char::from(b'0' + d)));
            prop_assert!(!is_valid_phone(&s));
        }

        #[test]
        fn prop_simple_addresses_are_valid_emails(
            local in "[A-Za-z0-9._%+-]{1,16}",
            domain in "[A-Za-z0-9-]{1,12}",
            tld in "[A-Za-z]{2,6}",
        ) {
            let email = format!("{local}@{domain}.{tld}");
            prop_assert!(is_valid_email(&email));
        }

        #[test]
        fn prop_missing_at_sign_is_invalid_email(
            s in "[A-Za-z0-9._%+-]{1,20}\\.[A-Za-z]{2,6}",
        ) {
            prop_assert!(!is_valid_email(&s));
        }
    }
}
