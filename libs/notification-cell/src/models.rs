use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A (doctor, date) whose availability was just committed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AvailabilityChange {
    pub doctor_id: String,
    pub date: NaiveDate,
}

impl AvailabilityChange {
    pub fn new(doctor_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            date,
        }
    }

    pub fn concerns(&self, doctor_id: &str, date: NaiveDate) -> bool {
        self.doctor_id == doctor_id && self.date == date
    }
}

/// Change as delivered to remote views, numbered in publish order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityEvent {
    pub sequence: u64,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub published_at: DateTime<Utc>,
}
