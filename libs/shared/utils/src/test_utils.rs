use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use shared_config::AppConfig;
use shared_models::time_format::parse_time;

use crate::clock::FixedClock;

/// Date every seeded appointment is booked on.
pub const SEED_DATE: &str = "2026-01-09";

pub struct TestConfig {
    pub seed_mock_data: bool,
    pub reset_on_logout: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: true,
            reset_on_logout: false,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_host: "127.0.0.1".to_string(),
            api_port: 0,
            seed_mock_data: self.seed_mock_data,
            reset_on_logout: self.reset_on_logout,
            login_delay_ms: 0,
            event_buffer: 16,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date must be YYYY-MM-DD")
}

pub fn time(value: &str) -> NaiveTime {
    parse_time(value).expect("test time must be HH:MM")
}

pub fn seed_date() -> NaiveDate {
    date(SEED_DATE)
}

/// Early morning on the seed date, before the first slot.
pub fn clock_before_clinic() -> FixedClock {
    FixedClock::at(seed_date(), time("07:00"))
}

pub fn clock_at(day: &str, at: &str) -> FixedClock {
    FixedClock::at(date(day), time(at))
}
