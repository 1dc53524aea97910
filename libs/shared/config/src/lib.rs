use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REGISTRATION_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub registration_delay_ms: u64,
    /// When set, the simulated backend fails every registration with this cause.
    pub registration_simulated_failure: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            registration_delay_ms: DEFAULT_REGISTRATION_DELAY_MS,
            registration_simulated_failure: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            port: parse_var("PORT", DEFAULT_PORT),
            registration_delay_ms: parse_var("REGISTRATION_DELAY_MS", DEFAULT_REGISTRATION_DELAY_MS),
            registration_simulated_failure: env::var("REGISTRATION_SIMULATED_FAILURE")
                .ok()
                .map(|cause| cause.trim().to_string())
                .filter(|cause| !cause.is_empty()),
        };

        if config.registration_simulated_failure.is_some() {
            warn!("REGISTRATION_SIMULATED_FAILURE set - every registration will fail");
        }

        config
    }

    pub fn registration_delay(&self) -> Duration {
        Duration::from_millis(self.registration_delay_ms)
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", key, default);
            default
        }
    }
}
