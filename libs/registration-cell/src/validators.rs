// =====================================================================================
// FIELD VALIDATORS - PURE CHECKS, FIRST FAILURE WINS
// =====================================================================================

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use crate::error::{Field, ValidationError};
use crate::formatters::extract_digits;
use crate::models::RegistrationForm;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_INSURANCE_ID_LENGTH: usize = 5;
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

// Letters are Unicode letters everywhere, matching `\w` in the email pattern.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} ]+$").expect("name pattern compiles"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$").expect("email pattern compiles")
});

static INSURANCE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{6,10}$").expect("insurance id pattern compiles"));

pub type ValidationResult = Result<(), ValidationError>;

/// Current UTC calendar date, the reference for production age checks.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn validate_name(value: &str) -> ValidationResult {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: Field::Name });
    }
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort { field: Field::Name, min: MIN_NAME_LENGTH });
    }
    if !NAME_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat {
            field: Field::Name,
            expected: "can only contain letters and spaces",
        });
    }

    Ok(())
}

pub fn validate_email(value: &str) -> ValidationResult {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: Field::Email });
    }
    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat {
            field: Field::Email,
            expected: "must be a valid address like name@example.com",
        });
    }

    Ok(())
}

pub fn validate_phone(value: &str) -> ValidationResult {
    validate_phone_field(value, Field::Phone)
}

pub fn validate_emergency_contact(value: &str) -> ValidationResult {
    validate_phone_field(value, Field::EmergencyContact)
}

fn validate_phone_field(value: &str, field: Field) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }

    match extract_digits(value).len() {
        10 | 11 => Ok(()),
        _ => Err(ValidationError::InvalidLength { field, expected: "10 or 11 digits" }),
    }
}

pub fn validate_date_of_birth(value: Option<NaiveDate>, reference: NaiveDate) -> ValidationResult {
    let date_of_birth = value.ok_or(ValidationError::EmptyField { field: Field::DateOfBirth })?;

    let age = calculate_age(date_of_birth, reference);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: Field::DateOfBirth,
            min: MIN_AGE,
            max: MAX_AGE,
        });
    }

    Ok(())
}

/// Only enforced when the patient declares insurance. The format check runs on
/// the upper-cased value so `ab123456` and `AB123456` are equivalent.
pub fn validate_insurance_id(value: &str, has_insurance: bool) -> ValidationResult {
    if !has_insurance {
        return Ok(());
    }

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: Field::InsuranceId });
    }
    if trimmed.chars().count() < MIN_INSURANCE_ID_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::InsuranceId,
            min: MIN_INSURANCE_ID_LENGTH,
        });
    }
    if !INSURANCE_ID_REGEX.is_match(&trimmed.to_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: Field::InsuranceId,
            expected: "must be two letters followed by 6-10 digits (e.g. AB123456)",
        });
    }

    Ok(())
}

pub fn validate_selection<T>(value: Option<&T>, field: Field) -> ValidationResult {
    value.map(|_| ()).ok_or(ValidationError::EmptyField { field })
}

/// Calendar-exact age at `reference`. Negative when the birth date lies in the future.
pub fn calculate_age(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();

    let birthday_pending = reference.month() < date_of_birth.month()
        || (reference.month() == date_of_birth.month() && reference.day() < date_of_birth.day());
    if birthday_pending {
        age -= 1;
    }

    age
}

/// Runs every field check in form order and stops at the first failure.
pub fn validate_form(form: &RegistrationForm, reference: NaiveDate) -> ValidationResult {
    validate_name(&form.name)?;
    validate_email(&form.email)?;
    validate_phone(&form.phone)?;
    validate_date_of_birth(form.date_of_birth, reference)?;
    validate_selection(form.gender.as_ref(), Field::Gender)?;
    validate_selection(form.blood_type.as_ref(), Field::BloodType)?;
    validate_insurance_id(&form.insurance_id, form.has_insurance)?;
    validate_emergency_contact(&form.emergency_contact)?;
    Ok(())
}
