// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::time_format;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booking of one slot. `patient_name` and `patient_number` are copied at
/// booking time and are not refreshed when the patient record changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_number: String,
    pub patient_name: String,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    pub doctor_id: String,
    pub status: AppointmentStatus,
    pub is_new_patient: bool,
    pub notes: Option<String>,
}

impl Appointment {
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Only scheduled appointments hold a slot.
    pub fn is_active(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    pub fn occupies(&self, doctor_id: &str, date: NaiveDate, time: NaiveTime) -> bool {
        self.is_active() && self.doctor_id == doctor_id && self.date == date && self.time == time
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "Scheduled"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub date: Option<NaiveDate>,
    #[serde(default, with = "optional_time")]
    pub time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl UpdateAppointmentRequest {
    pub fn apply_to(&self, appointment: &Appointment) -> Appointment {
        let mut updated = appointment.clone();
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(time) = self.time {
            updated.time = time;
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        if let Some(notes) = &self.notes {
            updated.notes = Some(notes.clone());
        }
        updated
    }

    pub fn moves_slot(&self, appointment: &Appointment) -> bool {
        self.date.is_some_and(|d| d != appointment.date) || self.time.is_some_and(|t| t != appointment.time)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    pub date: Option<NaiveDate>,
    pub doctor_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyAppointmentSummary {
    pub date: NaiveDate,
    pub total: usize,
    pub new_patients: usize,
    pub returning_patients: usize,
}

mod optional_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use shared_models::time_format;

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_some(&time_format::format_time(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| time_format::parse_time(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Cannot book appointments for past dates ({0})")]
    PastDate(NaiveDate),

    #[error("Cannot book appointments for times that have already passed ({date} {time})")]
    PastTime { date: NaiveDate, time: NaiveTime },

    #[error("No time slot starts at {0}")]
    SlotNotFound(NaiveTime),

    #[error("Time slot {0} is already booked")]
    SlotBooked(NaiveTime),

    #[error("Time slot {0} is blocked")]
    SlotBlocked(NaiveTime),
}

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        let message = error.to_string();
        match error {
            AppointmentError::NotFound(_)
            | AppointmentError::DoctorNotFound(_)
            | AppointmentError::PatientNotFound(_) => AppError::NotFound(message),
            AppointmentError::PastDate(_)
            | AppointmentError::PastTime { .. }
            | AppointmentError::SlotNotFound(_) => AppError::ValidationError(message),
            AppointmentError::SlotBooked(_) | AppointmentError::SlotBlocked(_) => AppError::Conflict(message),
        }
    }
}
