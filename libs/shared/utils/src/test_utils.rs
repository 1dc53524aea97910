use std::sync::Arc;

use shared_config::AppConfig;

pub struct TestConfig {
    pub registration_delay_ms: u64,
    pub registration_simulated_failure: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            registration_delay_ms: 0,
            registration_simulated_failure: None,
        }
    }
}

impl TestConfig {
    pub fn failing(cause: &str) -> Self {
        Self {
            registration_simulated_failure: Some(cause.to_string()),
            ..Self::default()
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.registration_delay_ms = delay_ms;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            port: 0,
            registration_delay_ms: self.registration_delay_ms,
            registration_simulated_failure: self.registration_simulated_failure.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_delay() {
        let config = TestConfig::default().to_app_config();
        assert_eq!(config.registration_delay_ms, 0);
        assert!(config.registration_simulated_failure.is_none());
    }

    #[test]
    fn test_failing_config() {
        let config = TestConfig::failing("backend down").with_delay_ms(5).to_app_config();
        assert_eq!(config.registration_delay_ms, 5);
        assert_eq!(config.registration_simulated_failure.as_deref(), Some("backend down"));
    }
}
