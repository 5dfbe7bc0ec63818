use facegate_core::KioskSettings;
use serde::Serialize;
use std::time::Duration;

/// Kiosk configuration, loaded from environment variables.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the recognition server (default: http://127.0.0.1:5000).
    pub server_url: String,
    /// Timeout in seconds for recognize/register/stop_camera requests.
    pub request_timeout_secs: u64,
    /// Recognition attempts allowed before the error modal.
    pub max_attempts: u32,
    pub feed_start_delay_ms: u64,
    pub login_success_delay_ms: u64,
    pub exhausted_delay_ms: u64,
    pub register_success_delay_ms: u64,
}

impl Config {
    /// Load configuration from `FACEGATE_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = KioskSettings::default();
        let parse_u64 = |key: &str, default: u64| -> u64 {
            get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };

        Self {
            server_url: get("FACEGATE_SERVER_URL")
                .unwrap_or_else(|| "http://127.0.0.1:5000".to_string()),
            request_timeout_secs: parse_u64("FACEGATE_REQUEST_TIMEOUT_SECS", 10),
            max_attempts: get("FACEGATE_MAX_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_attempts),
            feed_start_delay_ms: parse_u64(
                "FACEGATE_FEED_START_DELAY_MS",
                millis(defaults.feed_start_delay),
            ),
            login_success_delay_ms: parse_u64(
                "FACEGATE_LOGIN_SUCCESS_DELAY_MS",
                millis(defaults.login_success_delay),
            ),
            exhausted_delay_ms: parse_u64(
                "FACEGATE_EXHAUSTED_DELAY_MS",
                millis(defaults.exhausted_delay),
            ),
            register_success_delay_ms: parse_u64(
                "FACEGATE_REGISTER_SUCCESS_DELAY_MS",
                millis(defaults.register_success_delay),
            ),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn kiosk_settings(&self) -> KioskSettings {
        KioskSettings {
            max_attempts: self.max_attempts,
            feed_start_delay: Duration::from_millis(self.feed_start_delay_ms),
            login_success_delay: Duration::from_millis(self.login_success_delay_ms),
            exhausted_delay: Duration::from_millis(self.exhausted_delay_ms),
            register_success_delay: Duration::from_millis(self.register_success_delay_ms),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]);
        assert_eq!(c.server_url, "http://127.0.0.1:5000");
        assert_eq!(c.request_timeout_secs, 10);
        assert_eq!(c.max_attempts, 6);

        let s = c.kiosk_settings();
        assert_eq!(s.feed_start_delay, Duration::from_millis(100));
        assert_eq!(s.login_success_delay, Duration::from_millis(1500));
        assert_eq!(s.exhausted_delay, Duration::from_millis(1000));
        assert_eq!(s.register_success_delay, Duration::from_millis(2500));
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("FACEGATE_SERVER_URL", "http://kiosk.local:8080"),
            ("FACEGATE_MAX_ATTEMPTS", "3"),
            ("FACEGATE_LOGIN_SUCCESS_DELAY_MS", "0"),
        ]);
        assert_eq!(c.server_url, "http://kiosk.local:8080");
        assert_eq!(c.max_attempts, 3);
        assert_eq!(c.kiosk_settings().login_success_delay, Duration::ZERO);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let c = config(&[
            ("FACEGATE_MAX_ATTEMPTS", "0"),
            ("FACEGATE_REQUEST_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(c.max_attempts, 6);
        assert_eq!(c.request_timeout_secs, 10);
    }
}
