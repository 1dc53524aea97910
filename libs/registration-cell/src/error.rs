use std::fmt;

use thiserror::Error;

/// Form fields that can be rejected by a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    BloodType,
    InsuranceId,
    EmergencyContact,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::DateOfBirth => "date_of_birth",
            Field::Gender => "gender",
            Field::BloodType => "blood_type",
            Field::InsuranceId => "insurance_id",
            Field::EmergencyContact => "emergency_contact",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        [
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::DateOfBirth,
            Field::Gender,
            Field::BloodType,
            Field::InsuranceId,
            Field::EmergencyContact,
        ]
        .into_iter()
        .find(|field| field.key() == key)
    }

    /// Hint shown when a value cannot be read at all.
    pub fn expected_format(&self) -> &'static str {
        match self {
            Field::DateOfBirth => "must be a date in YYYY-MM-DD format",
            Field::Gender => "must be one of Male, Female or Other",
            Field::BloodType => "must be one of A+, A-, B+, B-, AB+, AB-, O+ or O-",
            _ => "has an invalid value",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone number",
            Field::DateOfBirth => "Date of birth",
            Field::Gender => "Gender",
            Field::BloodType => "Blood type",
            Field::InsuranceId => "Insurance ID",
            Field::EmergencyContact => "Emergency contact",
        };
        f.write_str(label)
    }
}

/// A rejected field. The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: Field },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: Field, min: usize },

    #[error("{field} {expected}")]
    InvalidFormat { field: Field, expected: &'static str },

    #[error("{field} must be {expected}")]
    InvalidLength { field: Field, expected: &'static str },

    #[error("{field} must correspond to an age between {min} and {max}")]
    OutOfRange { field: Field, min: i32, max: i32 },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::OutOfRange { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot assemble patient record: {0}")]
    InvalidState(String),

    #[error("Registration failed: {cause}")]
    RemoteFailure { cause: String },

    #[error("A registration is already being submitted for this form")]
    AlreadySubmitting,
}

impl From<RegistrationError> for shared_models::AppError {
    fn from(err: RegistrationError) -> Self {
        use shared_models::AppError;

        match &err {
            RegistrationError::Validation(e) => AppError::Validation {
                field: e.field().key().to_string(),
                message: e.to_string(),
            },
            RegistrationError::InvalidState(_) => AppError::BadRequest(err.to_string()),
            RegistrationError::RemoteFailure { .. } => AppError::ExternalService(err.to_string()),
            RegistrationError::AlreadySubmitting => AppError::Conflict(err.to_string()),
        }
    }
}
