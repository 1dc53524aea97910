// =====================================================================================
// FORM STATE - IMMUTABLE PER STEP, ADVANCED BY A PURE REDUCER
// =====================================================================================

use chrono::NaiveDate;

use crate::error::RegistrationError;
use crate::formatters::split_list;
use crate::models::{BloodType, Gender, PatientRecord, RegistrationForm};

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    NameChanged(String),
    EmailChanged(String),
    PhoneChanged(String),
    AddressChanged(String),
    DateOfBirthPicked(Option<NaiveDate>),
    GenderSelected(Gender),
    BloodTypeSelected(BloodType),
    InsuranceToggled(bool),
    InsuranceIdChanged(String),
    EmergencyContactChanged(String),
    AllergiesToggled(bool),
    /// Comma or newline separated free text.
    AllergiesEdited(String),
    /// Comma or newline separated free text.
    MedicationsEdited(String),
    MedicalHistoryChanged(String),
    ValidationFailed(String),
    SubmitStarted,
    SubmitSucceeded(PatientRecord),
    SubmitFailed(String),
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    form: RegistrationForm,
    submitting: bool,
    error_message: Option<String>,
    last_registered: Option<PatientRecord>,
}

impl FormState {
    pub fn from_form(form: RegistrationForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn last_registered(&self) -> Option<&PatientRecord> {
        self.last_registered.as_ref()
    }

    /// Rejects a second submission while one is in flight.
    pub fn ensure_idle(&self) -> Result<(), RegistrationError> {
        if self.submitting {
            return Err(RegistrationError::AlreadySubmitting);
        }
        Ok(())
    }

    pub fn apply(self, event: FormEvent) -> Self {
        let mut next = self;

        match event {
            FormEvent::NameChanged(v) => next.edit(|f| f.name = v),
            FormEvent::EmailChanged(v) => next.edit(|f| f.email = v),
            FormEvent::PhoneChanged(v) => next.edit(|f| f.phone = v),
            FormEvent::AddressChanged(v) => next.edit(|f| f.address = v),
            FormEvent::DateOfBirthPicked(v) => next.edit(|f| f.date_of_birth = v),
            FormEvent::GenderSelected(v) => next.edit(|f| f.gender = Some(v)),
            FormEvent::BloodTypeSelected(v) => next.edit(|f| f.blood_type = Some(v)),
            FormEvent::InsuranceToggled(enabled) => next.edit(|f| {
                f.has_insurance = enabled;
                if !enabled {
                    f.insurance_id.clear();
                }
            }),
            FormEvent::InsuranceIdChanged(v) => next.edit(|f| f.insurance_id = v),
            FormEvent::EmergencyContactChanged(v) => next.edit(|f| f.emergency_contact = v),
            FormEvent::AllergiesToggled(enabled) => next.edit(|f| {
                f.has_allergies = enabled;
                if !enabled {
                    f.allergies.clear();
                }
            }),
            FormEvent::AllergiesEdited(text) => next.edit(|f| f.allergies = split_list(&text)),
            FormEvent::MedicationsEdited(text) => {
                next.edit(|f| f.current_medications = split_list(&text))
            }
            FormEvent::MedicalHistoryChanged(v) => next.edit(|f| f.medical_history = v),
            FormEvent::ValidationFailed(message) => next.error_message = Some(message),
            FormEvent::SubmitStarted => {
                next.submitting = true;
                next.error_message = None;
            }
            FormEvent::SubmitSucceeded(record) => {
                next.submitting = false;
                next.error_message = None;
                next.form = RegistrationForm::default();
                next.last_registered = Some(record);
            }
            FormEvent::SubmitFailed(message) => {
                next.submitting = false;
                next.error_message = Some(message);
            }
            FormEvent::Reset => next = Self::default(),
        }

        next
    }

    fn edit(&mut self, change: impl FnOnce(&mut RegistrationForm)) {
        change(&mut self.form);
        self.error_message = None;
    }
}
