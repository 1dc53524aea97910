use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use shared_config::AppConfig;

use crate::error::RegistrationError;
use crate::models::PatientRecord;

/// Remote registration backend. One call, one completion: no retries and no
/// cancellation once started.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationSubmitter: Send + Sync {
    async fn register_patient(&self, record: &PatientRecord) -> Result<(), RegistrationError>;
}

/// Stand-in backend: waits a fixed delay, logs the payload and resolves.
#[derive(Debug, Clone)]
pub struct SimulatedRegistrationSubmitter {
    delay: Duration,
    failure_cause: Option<String>,
}

impl SimulatedRegistrationSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure_cause: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            delay: config.registration_delay(),
            failure_cause: config.registration_simulated_failure.clone(),
        }
    }

    /// Every call will fail with `cause` after the delay.
    pub fn failing_with(mut self, cause: impl Into<String>) -> Self {
        self.failure_cause = Some(cause.into());
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RegistrationSubmitter for SimulatedRegistrationSubmitter {
    #[instrument(skip(self, record), fields(email = %record.email()))]
    async fn register_patient(&self, record: &PatientRecord) -> Result<(), RegistrationError> {
        debug!("Simulating registration call ({} ms)", self.delay.as_millis());
        tokio::time::sleep(self.delay).await;

        if let Some(cause) = &self.failure_cause {
            warn!("Simulated registration backend failure: {}", cause);
            return Err(RegistrationError::RemoteFailure { cause: cause.clone() });
        }

        let payload = serde_json::Value::Object(record.to_map());
        info!(%payload, "Patient registered");

        Ok(())
    }
}
