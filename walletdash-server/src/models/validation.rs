//! Field validation for request bodies
//!
//! Validation collects every violated field rather than stopping at the first.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Pragmatic address check: one `@`, no whitespace, a dotted domain.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Validation error for a single request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or blank
    Empty { field: &'static str },

    /// Field is present but malformed
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body could not be decoded; `field` is the JSON path, or `body`
    Undecodable { field: String, reason: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::Empty { field } | Self::InvalidFormat { field, .. } => field,
            Self::Undecodable { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Undecodable { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// JSON shape of one violation in a 422 response
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(e: &ValidationError) -> Self {
        Self {
            field: e.field().to_owned(),
            message: e.to_string(),
        }
    }
}

/// Collects violations across the fields of one request
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-blank string; returns the trimmed value when valid.
    pub fn required<'a>(&mut self, field: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.errors.push(ValidationError::Empty { field });
                None
            }
        }
    }

    /// Require a syntactically valid email address.
    pub fn email<'a>(&mut self, field: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        let value = self.required(field, value)?;
        if EMAIL_RE.is_match(value) {
            Some(value)
        } else {
            self.errors.push(ValidationError::InvalidFormat {
                field,
                reason: "must be a valid email address",
            });
            None
        }
    }

    /// Finish validation, yielding `value` only when no field failed.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "contactEmail",
            reason: "must be a valid email address",
        };
        assert_eq!(err.to_string(), "contactEmail: must be a valid email address");
        assert_eq!(ValidationError::Empty { field: "state" }.to_string(), "state cannot be empty");
    }

    #[test]
    fn emails() {
        let mut v = Validator::new();
        assert_eq!(v.email("e", Some("a@b.co")), Some("a@b.co"));
        assert!(v.email("e", Some("not-an-email")).is_none());
        assert!(v.email("e", Some("a@b")).is_none());
        assert!(v.email("e", Some("a b@c.d")).is_none());
    }

    #[test]
    fn collects_every_violation() {
        let mut v = Validator::new();
        v.email("contactEmail", Some("nope"));
        v.required("reservationId", Some("   "));
        v.required("state", None);

        let errors = v.finish(|| ()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, ["contactEmail", "reservationId", "state"]);
    }

    #[test]
    fn clean_input_finishes() {
        let mut v = Validator::new();
        let id = v.required("reservationId", Some(" abc ")).map(str::to_owned);
        assert_eq!(v.finish(|| id).unwrap().as_deref(), Some("abc"));
    }
}
