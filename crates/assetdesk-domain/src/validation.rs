//! Field Validators - The admission rules for every constrained value
//!
//! Each rule trims the raw input, then checks length and character class.
//! On success it hands back the canonical (trimmed) value to store; on
//! failure it names the field and the reason. Entities call these at the
//! moment a field is assigned, never later.

use std::net::IpAddr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{FieldValidationError, ValidationFailure};

/// Upper bound on every validated text field, counted in characters
pub const MAX_FIELD_LENGTH: usize = 64;

/// Earliest purchase date a hardware asset may carry
pub fn min_purchase_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Character-class rules for required text fields
///
/// Every rule accepts Unicode letters and digits; they differ in which
/// punctuation they admit on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Letters, digits, whitespace, hyphen
    DepartmentName,
    /// Letters, digits, whitespace, period, hyphen
    PersonName,
    /// Hardware name, model and type: letters, digits, whitespace, period, hyphen
    AssetText,
    /// Letters, digits, whitespace, period, hyphen
    SoftwareName,
    /// Letters, digits, period
    SoftwareVersion,
    /// Letters, digits, whitespace, hyphen, period, apostrophe
    Manufacturer,
}

impl TextRule {
    /// Whether a single character is admitted by this rule
    pub fn allows(self, c: char) -> bool {
        if c.is_alphanumeric() {
            return true;
        }

        match self {
            TextRule::DepartmentName => c.is_whitespace() || c == '-',
            TextRule::PersonName | TextRule::AssetText | TextRule::SoftwareName => {
                c.is_whitespace() || c == '.' || c == '-'
            }
            TextRule::SoftwareVersion => c == '.',
            TextRule::Manufacturer => c.is_whitespace() || matches!(c, '-' | '.' | '\''),
        }
    }

    /// Pure predicate form of [`TextRule::apply`]
    pub fn is_valid(self, raw: &str) -> bool {
        self.check(raw.trim()).is_ok()
    }

    /// Validate and canonicalize a raw value for `field`
    pub fn apply(self, field: &'static str, raw: &str) -> Result<String, FieldValidationError> {
        let trimmed = raw.trim();
        self.check(trimmed)
            .map_err(|reason| FieldValidationError::new(field, reason))?;
        Ok(trimmed.to_string())
    }

    fn check(self, trimmed: &str) -> Result<(), ValidationFailure> {
        check_length(trimmed)?;
        match trimmed.chars().find(|c| !self.allows(*c)) {
            Some(c) => Err(ValidationFailure::InvalidCharacter(c)),
            None => Ok(()),
        }
    }
}

fn check_length(trimmed: &str) -> Result<(), ValidationFailure> {
    if trimmed.is_empty() {
        return Err(ValidationFailure::Empty);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_FIELD_LENGTH {
        return Err(ValidationFailure::TooLong {
            max: MAX_FIELD_LENGTH,
            actual,
        });
    }
    Ok(())
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Whether `raw` is a syntactically valid email address
pub fn is_valid_email(raw: &str) -> bool {
    email(raw).is_ok()
}

/// Validate and canonicalize an email address
pub fn email(raw: &str) -> Result<String, FieldValidationError> {
    let trimmed = raw.trim();
    check_length(trimmed).map_err(|reason| FieldValidationError::new("email", reason))?;
    if !email_pattern().is_match(trimmed) {
        return Err(FieldValidationError::new(
            "email",
            ValidationFailure::InvalidFormat,
        ));
    }
    Ok(trimmed.to_string())
}

/// Parse an IPv4 or IPv6 address
pub fn ip_address(raw: &str) -> Result<IpAddr, FieldValidationError> {
    let trimmed = raw.trim();
    check_length(trimmed).map_err(|reason| FieldValidationError::new("ip address", reason))?;
    trimmed
        .parse::<IpAddr>()
        .map_err(|_| FieldValidationError::new("ip address", ValidationFailure::InvalidFormat))
}

/// Validate optional free-text notes
///
/// Absent or whitespace-only input means "no notes". Present input must fit
/// in [`MAX_FIELD_LENGTH`] characters and contain no control characters.
pub fn notes(raw: Option<&str>) -> Result<Option<String>, FieldValidationError> {
    let trimmed = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(trimmed) => trimmed,
    };

    let actual = trimmed.chars().count();
    if actual > MAX_FIELD_LENGTH {
        return Err(FieldValidationError::new(
            "notes",
            ValidationFailure::TooLong {
                max: MAX_FIELD_LENGTH,
                actual,
            },
        ));
    }
    if let Some(c) = trimmed.chars().find(|c| c.is_control()) {
        return Err(FieldValidationError::new(
            "notes",
            ValidationFailure::InvalidCharacter(c),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// Validate an optional purchase date against `[1990-01-01, today]`
pub fn purchase_date(
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, FieldValidationError> {
    match date {
        Some(d) if d < min_purchase_date() || d > today => Err(FieldValidationError::new(
            "purchase date",
            ValidationFailure::OutOfRange,
        )),
        other => Ok(other),
    }
}
