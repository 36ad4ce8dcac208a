//! Sign-up form validation
//!
//! Every rule is evaluated independently so the form can show all of its
//! problems at once, one message per field.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of digits a mobile number must have once separators are removed
pub const MOBILE_DIGITS: usize = 10;

const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";
const MOBILE_SEPARATORS: &str = r"[-()\s]";

/// Raw sign-up form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        mobile_number: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            mobile_number: mobile_number.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

/// Form fields that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    MobileNumber,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::MobileNumber => "Mobile Number",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }
}

/// A single failed rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidMobile,
    PasswordTooShort,
    PasswordMismatch,
}

impl FieldError {
    /// Inline message for `field`
    pub fn message(&self, field: Field) -> String {
        match self {
            FieldError::Required => match field {
                Field::FullName => "Full name is required".to_string(),
                Field::Email => "Email is required".to_string(),
                Field::MobileNumber => "Mobile number is required".to_string(),
                Field::Password => "Password is required".to_string(),
                Field::ConfirmPassword => "Confirm password is required".to_string(),
            },
            FieldError::InvalidEmail => "Email is invalid".to_string(),
            FieldError::InvalidMobile => {
                format!("Mobile number must be {} digits", MOBILE_DIGITS)
            }
            FieldError::PasswordTooShort => {
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN)
            }
            FieldError::PasswordMismatch => "Passwords do not match".to_string(),
        }
    }
}

/// All failed rules of one form, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// `(field, message)` pairs in form order
    pub fn messages(&self) -> Vec<(Field, String)> {
        self.iter().map(|(f, e)| (f, e.message(f))).collect()
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.messages().into_iter().map(|(_, m)| m).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Compiled sign-up rules
#[derive(Debug, Clone)]
pub struct SignUpValidator {
    email: Regex,
    separators: Regex,
}

impl SignUpValidator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            separators: Regex::new(MOBILE_SEPARATORS)?,
        })
    }

    /// Check every rule, returning all failures
    pub fn validate(&self, form: &SignUpForm) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if form.full_name.trim().is_empty() {
            errors.insert(Field::FullName, FieldError::Required);
        }

        if form.email.trim().is_empty() {
            errors.insert(Field::Email, FieldError::Required);
        } else if !self.email.is_match(&form.email) {
            errors.insert(Field::Email, FieldError::InvalidEmail);
        }

        if form.mobile_number.trim().is_empty() {
            errors.insert(Field::MobileNumber, FieldError::Required);
        } else if !self.is_valid_mobile(&form.mobile_number) {
            errors.insert(Field::MobileNumber, FieldError::InvalidMobile);
        }

        if form.password.is_empty() {
            errors.insert(Field::Password, FieldError::Required);
        } else if form.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(Field::Password, FieldError::PasswordTooShort);
        }

        if form.password != form.confirm_password {
            errors.insert(Field::ConfirmPassword, FieldError::PasswordMismatch);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_valid_mobile(&self, raw: &str) -> bool {
        let digits = self.separators.replace_all(raw, "");
        digits.len() == MOBILE_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm::new(
            "Asha Rao",
            "asha@example.com",
            "98765 43210",
            "secret1",
            "secret1",
        )
    }

    fn validator() -> SignUpValidator {
        SignUpValidator::new().unwrap()
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validator().validate(&valid_form()).is_ok());
    }

    #[test]
    fn test_empty_full_name() {
        let form = SignUpForm {
            full_name: "   ".to_string(),
            ..valid_form()
        };
        let errors = validator().validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::FullName), Some(FieldError::Required));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            FieldError::Required.message(Field::FullName),
            "Full name is required"
        );
        assert_eq!(
            FieldError::Required.message(Field::MobileNumber),
            "Mobile number is required"
        );
    }

    #[test]
    fn test_email_without_at_sign() {
        let form = SignUpForm {
            email: "asha.example.com".to_string(),
            ..valid_form()
        };
        let errors = validator().validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmail));
    }

    #[test]
    fn test_email_needs_dot_after_at() {
        let form = SignUpForm {
            email: "asha@localhost".to_string(),
            ..valid_form()
        };
        let errors = validator().validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmail));
    }

    #[test]
    fn test_empty_email_is_required_not_invalid() {
        let form = SignUpForm {
            email: String::new(),
            ..valid_form()
        };
        let errors = validator().validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(FieldError::Required));
    }

    #[test]
    fn test_mobile_rules() {
        let v = validator();

        for ok in ["9876543210", "(987) 654-3210", "987-654-3210", " 98765 43210 "] {
            let form = SignUpForm {
                mobile_number: ok.to_string(),
                ..valid_form()
            };
            assert!(v.validate(&form).is_ok(), "{ok} should be accepted");
        }

        for bad in ["987654321", "98765432101", "98765abcde", "+919876543210"] {
            let form = SignUpForm {
                mobile_number: bad.to_string(),
                ..valid_form()
            };
            let errors = v.validate(&form).unwrap_err();
            assert_eq!(
                errors.get(Field::MobileNumber),
                Some(FieldError::InvalidMobile),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_short_password() {
        let form = SignUpForm {
            password: "abc12".to_string(),
            confirm_password: "abc12".to_string(),
            ..valid_form()
        };
        let errors = validator().validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::Password), Some(FieldError::PasswordTooShort));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_password_mismatch() {
        let form = SignUpForm {
            confirm_password: "secret2".to_string(),
            ..valid_form()
        };
        let errors = validator().validate(&form).unwrap_err();
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some(FieldError::PasswordMismatch)
        );
    }

    #[test]
    fn test_errors_fire_independently() {
        let form = SignUpForm::new("", "nope", "123", "abc", "xyz");
        let errors = validator().validate(&form).unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(Field::FullName), Some(FieldError::Required));
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get(Field::MobileNumber), Some(FieldError::InvalidMobile));
        assert_eq!(errors.get(Field::Password), Some(FieldError::PasswordTooShort));
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some(FieldError::PasswordMismatch)
        );

        let messages = errors.messages();
        assert_eq!(messages[0].0, Field::FullName);
        assert_eq!(messages[4].1, "Passwords do not match");
    }
}
