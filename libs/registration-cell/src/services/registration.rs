use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use shared_config::AppConfig;

use crate::controller::{FormEvent, FormState};
use crate::error::{RegistrationError, ValidationError};
use crate::models::{PatientRecord, RegistrationForm};
use crate::services::submitter::{RegistrationSubmitter, SimulatedRegistrationSubmitter};
use crate::validators::validate_form;

/// Orchestrates one registration: validate, assemble, submit.
pub struct RegistrationService {
    submitter: Arc<dyn RegistrationSubmitter>,
}

impl RegistrationService {
    pub fn new(submitter: Arc<dyn RegistrationSubmitter>) -> Self {
        Self { submitter }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(SimulatedRegistrationSubmitter::from_config(config)))
    }

    pub fn validate(&self, form: &RegistrationForm, now: DateTime<Utc>) -> Result<(), ValidationError> {
        validate_form(form, now.date_naive())
    }

    #[instrument(skip(self, form))]
    pub async fn register(
        &self,
        form: &RegistrationForm,
        now: DateTime<Utc>,
    ) -> Result<PatientRecord, RegistrationError> {
        self.validate(form, now)?;
        self.submit_validated(form, now).await
    }

    /// Assembles and submits a form whose validation already passed.
    async fn submit_validated(
        &self,
        form: &RegistrationForm,
        now: DateTime<Utc>,
    ) -> Result<PatientRecord, RegistrationError> {
        let record = PatientRecord::assemble(form, now)?;
        debug!("Submitting registration for: {}", record.email());

        self.submitter.register_patient(&record).await?;
        info!("Registration completed for: {}", record.email());

        Ok(record)
    }

    /// Advances a form state through one submission attempt. A state that is
    /// already submitting comes back untouched.
    pub async fn submit(&self, state: FormState) -> FormState {
        self.submit_at(state, Utc::now()).await
    }

    pub async fn submit_at(&self, state: FormState, now: DateTime<Utc>) -> FormState {
        if let Err(e) = state.ensure_idle() {
            warn!("Ignoring submission: {}", e);
            return state;
        }

        if let Err(e) = self.validate(state.form(), now) {
            debug!("Form rejected on {}: {}", e.field().key(), e);
            return state.apply(FormEvent::ValidationFailed(e.to_string()));
        }

        let state = state.apply(FormEvent::SubmitStarted);
        let result = self.submit_validated(state.form(), now).await;
        match result {
            Ok(record) => state.apply(FormEvent::SubmitSucceeded(record)),
            Err(e) => {
                warn!("Registration attempt failed: {}", e);
                state.apply(FormEvent::SubmitFailed(e.to_string()))
            }
        }
    }
}
