use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_host: String,
    pub api_port: u16,
    pub seed_mock_data: bool,
    pub reset_on_logout: bool,
    pub login_delay_ms: u64,
    pub event_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            seed_mock_data: true,
            reset_on_logout: false,
            login_delay_ms: 0,
            event_buffer: 100,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            api_host: env::var("API_HOST")
                .unwrap_or_else(|_| {
                    warn!("API_HOST not set, using default");
                    defaults.api_host.clone()
                }),
            api_port: parse_var("API_PORT", defaults.api_port),
            seed_mock_data: parse_var("CLINIC_SEED_MOCK_DATA", defaults.seed_mock_data),
            reset_on_logout: parse_var("CLINIC_RESET_ON_LOGOUT", defaults.reset_on_logout),
            login_delay_ms: parse_var("CLINIC_LOGIN_DELAY_MS", defaults.login_delay_ms),
            event_buffer: parse_var("CLINIC_EVENT_BUFFER", defaults.event_buffer),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - event buffer must be positive");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.event_buffer > 0
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using default {:?}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {:?}", key, default);
            default
        }
    }
}
