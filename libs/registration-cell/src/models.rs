use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Field, RegistrationError, ValidationError};
use crate::formatters::format_phone_number;
use crate::validators::calculate_age;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or(ValidationError::InvalidFormat {
                field: Field::Gender,
                expected: Field::Gender.expected_format(),
            })
    }
}

impl TryFrom<String> for Gender {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|b| b.as_str() == normalized)
            .ok_or(ValidationError::InvalidFormat {
                field: Field::BloodType,
                expected: Field::BloodType.expected_format(),
            })
    }
}

impl TryFrom<String> for BloodType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raw, in-progress form values exactly as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub blood_type: Option<BloodType>,
    pub has_insurance: bool,
    pub insurance_id: String,
    pub emergency_contact: String,
    pub has_allergies: bool,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
    pub medical_history: String,
}

/// An assembled registration. Only obtainable through [`PatientRecord::assemble`]
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    name: String,
    email: String,
    phone: String,
    address: String,
    date_of_birth: NaiveDate,
    age: u32,
    gender: Gender,
    blood_type: BloodType,
    has_insurance: bool,
    insurance_id: Option<String>,
    emergency_contact: String,
    has_allergies: bool,
    allergies: Vec<String>,
    current_medications: Vec<String>,
    medical_history: String,
    registration_date: DateTime<Utc>,
}

impl PatientRecord {
    /// Normalizes an already-validated form. No field rules are checked here;
    /// callers run `validate_form` first.
    pub fn assemble(
        form: &RegistrationForm,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, RegistrationError> {
        let date_of_birth = form
            .date_of_birth
            .ok_or_else(|| RegistrationError::InvalidState("date of birth is missing".into()))?;
        let gender = form
            .gender
            .ok_or_else(|| RegistrationError::InvalidState("gender is not selected".into()))?;
        let blood_type = form
            .blood_type
            .ok_or_else(|| RegistrationError::InvalidState("blood type is not selected".into()))?;

        let age = calculate_age(date_of_birth, registered_at.date_naive());
        let age = u32::try_from(age).map_err(|_| {
            RegistrationError::InvalidState(format!("date of birth {} is in the future", date_of_birth))
        })?;

        let insurance_id = form
            .has_insurance
            .then(|| form.insurance_id.trim().to_uppercase());

        let allergies = if form.has_allergies {
            clean_list(&form.allergies)
        } else {
            Vec::new()
        };

        Ok(Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            phone: format_phone_number(form.phone.trim()),
            address: form.address.trim().to_string(),
            date_of_birth,
            age,
            gender,
            blood_type,
            has_insurance: form.has_insurance,
            insurance_id,
            emergency_contact: format_phone_number(form.emergency_contact.trim()),
            has_allergies: form.has_allergies,
            allergies,
            current_medications: clean_list(&form.current_medications),
            medical_history: form.medical_history.trim().to_string(),
            registration_date: registered_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn blood_type(&self) -> BloodType {
        self.blood_type
    }

    pub fn has_insurance(&self) -> bool {
        self.has_insurance
    }

    pub fn insurance_id(&self) -> Option<&str> {
        self.insurance_id.as_deref()
    }

    pub fn emergency_contact(&self) -> &str {
        &self.emergency_contact
    }

    pub fn has_allergies(&self) -> bool {
        self.has_allergies
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    pub fn current_medications(&self) -> &[String] {
        &self.current_medications
    }

    pub fn medical_history(&self) -> &str {
        &self.medical_history
    }

    pub fn registration_date(&self) -> DateTime<Utc> {
        self.registration_date
    }

    /// Key/value form used for logging and transport.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".into(), json!(self.name));
        map.insert("email".into(), json!(self.email));
        map.insert("phone".into(), json!(self.phone));
        map.insert("address".into(), json!(self.address));
        map.insert(
            "date_of_birth".into(),
            json!(self.date_of_birth.format("%Y-%m-%d").to_string()),
        );
        map.insert("age".into(), json!(self.age));
        map.insert("gender".into(), json!(self.gender.as_str()));
        map.insert("blood_type".into(), json!(self.blood_type.as_str()));
        map.insert("has_insurance".into(), json!(self.has_insurance));
        map.insert("insurance_id".into(), json!(self.insurance_id));
        map.insert("emergency_contact".into(), json!(self.emergency_contact));
        map.insert("has_allergies".into(), json!(self.has_allergies));
        map.insert("allergies".into(), json!(self.allergies));
        map.insert("current_medications".into(), json!(self.current_medications));
        map.insert("medical_history".into(), json!(self.medical_history));
        map.insert(
            "registration_date".into(),
            json!(self.registration_date.to_rfc3339()),
        );
        map
    }
}

fn clean_list(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn registered_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    fn jane() -> RegistrationForm {
        RegistrationForm {
            name: "  Jane Doe ".into(),
            email: " Jane@Example.COM ".into(),
            phone: "5551234567".into(),
            address: " 1 Main Street ".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: Some(Gender::Female),
            blood_type: Some(BloodType::OPositive),
            emergency_contact: "5559876543".into(),
            ..RegistrationForm::default()
        }
    }

    #[test]
    fn test_assemble_normalizes_fields() {
        let record = PatientRecord::assemble(&jane(), registered_at()).unwrap();

        assert_eq!(record.name(), "Jane Doe");
        assert_eq!(record.email(), "jane@example.com");
        assert_eq!(record.phone(), "(555) 123-4567");
        assert_eq!(record.emergency_contact(), "(555) 987-6543");
        assert_eq!(record.address(), "1 Main Street");
        assert_eq!(record.age(), 34);
        assert_eq!(record.insurance_id(), None);
        assert_eq!(record.registration_date(), registered_at());
        assert!(record.allergies().is_empty());
    }

    #[test]
    fn test_insurance_id_only_kept_when_insured() {
        let form = RegistrationForm {
            insurance_id: " ab123456 ".into(),
            ..jane()
        };
        let record = PatientRecord::assemble(&form, registered_at()).unwrap();
        assert_eq!(record.insurance_id(), None);

        let form = RegistrationForm { has_insurance: true, ..form };
        let record = PatientRecord::assemble(&form, registered_at()).unwrap();
        assert_eq!(record.insurance_id(), Some("AB123456"));
    }

    #[test]
    fn test_allergies_only_kept_when_declared() {
        let form = RegistrationForm {
            allergies: vec!["Penicillin".into()],
            current_medications: vec![" Ibuprofen ".into(), "  ".into()],
            ..jane()
        };
        let record = PatientRecord::assemble(&form, registered_at()).unwrap();
        assert!(record.allergies().is_empty());
        assert_eq!(record.current_medications(), ["Ibuprofen".to_string()]);

        let form = RegistrationForm { has_allergies: true, ..form };
        let record = PatientRecord::assemble(&form, registered_at()).unwrap();
        assert_eq!(record.allergies(), ["Penicillin".to_string()]);
    }

    #[test]
    fn test_assemble_requires_complete_form() {
        let form = RegistrationForm { date_of_birth: None, ..jane() };
        assert_matches!(
            PatientRecord::assemble(&form, registered_at()),
            Err(RegistrationError::InvalidState(_))
        );

        let form = RegistrationForm { blood_type: None, ..jane() };
        assert_matches!(
            PatientRecord::assemble(&form, registered_at()),
            Err(RegistrationError::InvalidState(_))
        );
    }

    #[test]
    fn test_to_map_encoding() {
        let form = RegistrationForm {
            has_allergies: true,
            allergies: vec!["Latex".into()],
            ..jane()
        };
        let map = PatientRecord::assemble(&form, registered_at()).unwrap().to_map();

        assert_eq!(map["date_of_birth"], "1990-01-01");
        assert_eq!(map["registration_date"], "2024-06-15T09:30:00+00:00");
        assert_eq!(map["age"], 34);
        assert_eq!(map["gender"], "Female");
        assert_eq!(map["blood_type"], "O+");
        assert_eq!(map["insurance_id"], Value::Null);
        assert_eq!(map["has_allergies"], true);
        assert_eq!(map["allergies"], json!(["Latex"]));
        assert_eq!(map.len(), 16);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" ab- ".parse::<BloodType>().unwrap(), BloodType::AbNegative);
        assert_matches!("C+".parse::<BloodType>(), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!("unknown".parse::<Gender>(), Err(ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_form_selections_deserialize_through_from_str() {
        let form: RegistrationForm = serde_json::from_value(json!({
            "gender": "female",
            "blood_type": " ab- "
        }))
        .unwrap();
        assert_eq!(form.gender, Some(Gender::Female));
        assert_eq!(form.blood_type, Some(BloodType::AbNegative));

        let err = serde_json::from_value::<RegistrationForm>(json!({ "gender": "robot" })).unwrap_err();
        assert!(err.to_string().contains("Gender must be one of Male, Female or Other"));
    }

    #[test]
    fn test_selections_serialize_as_labels() {
        assert_eq!(serde_json::to_value(Gender::Other).unwrap(), json!("Other"));
        assert_eq!(serde_json::to_value(BloodType::ONegative).unwrap(), json!("O-"));
    }

    #[test]
    fn test_form_deserializes_with_defaults() {
        let form: RegistrationForm = serde_json::from_value(json!({
            "name": "Jane Doe",
            "date_of_birth": "1990-01-01",
            "gender": "Female",
            "blood_type": "O+"
        }))
        .unwrap();

        assert_eq!(form.blood_type, Some(BloodType::OPositive));
        assert_eq!(form.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert!(!form.has_insurance);
        assert!(form.allergies.is_empty());
    }
}
