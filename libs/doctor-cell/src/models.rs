use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_models::time_format;

// ==============================================================================
// DOCTOR CONFIGURATION
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingHours {
    #[serde(with = "time_format")]
    pub start: NaiveTime,
    #[serde(with = "time_format")]
    pub end: NaiveTime,
    pub slot_duration_minutes: u32,
}

impl WorkingHours {
    pub fn new(start: NaiveTime, end: NaiveTime, slot_duration_minutes: u32) -> Result<Self, DoctorError> {
        let hours = Self {
            start,
            end,
            slot_duration_minutes,
        };
        hours.validate()?;
        Ok(hours)
    }

    /// Same-day interval only; overnight shifts are not supported.
    pub fn validate(&self) -> Result<(), DoctorError> {
        if self.slot_duration_minutes == 0 {
            return Err(DoctorError::InvalidWorkingHours(
                "Slot duration must be greater than zero".to_string(),
            ));
        }
        if self.start >= self.end {
            return Err(DoctorError::InvalidWorkingHours(format!(
                "Start time {} must be before end time {}",
                time_format::format_time(self.start),
                time_format::format_time(self.end)
            )));
        }
        Ok(())
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_duration_minutes))
    }

    /// Number of whole slots that fit between start and end.
    pub fn slot_count(&self) -> usize {
        if self.slot_duration_minutes == 0 || self.start >= self.end {
            return 0;
        }
        let span = (self.end - self.start).num_minutes();
        (span / i64::from(self.slot_duration_minutes)) as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: Option<String>,
    pub working_hours: WorkingHours,
}

// ==============================================================================
// SLOTS AND AVAILABILITY
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub appointment_id: Option<String>,
    pub is_blocked: bool,
    pub block_reason: Option<String>,
}

impl TimeSlot {
    pub fn slot_id(date: NaiveDate, start_time: NaiveTime) -> String {
        format!("{}_{}", date.format("%Y-%m-%d"), time_format::format_time(start_time))
    }

    pub fn is_available(&self) -> bool {
        !self.is_booked && !self.is_blocked
    }

    /// Inclusive three-way overlap used when blocking a range: the slot starts
    /// inside it, ends inside it, or covers it entirely.
    pub fn falls_within_block(&self, start: NaiveTime, end: NaiveTime) -> bool {
        (self.start_time >= start && self.start_time < end)
            || (self.end_time > start && self.end_time <= end)
            || (self.start_time <= start && self.end_time >= end)
    }

    pub fn mark_booked(&mut self, appointment_id: &str) {
        self.is_booked = true;
        self.appointment_id = Some(appointment_id.to_string());
    }

    pub fn release(&mut self) {
        self.is_booked = false;
        self.appointment_id = None;
    }

    pub fn block(&mut self, reason: Option<String>) {
        self.is_blocked = true;
        self.block_reason = reason;
    }

    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.block_reason = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoctorAvailability {
    pub id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time_slots: Vec<TimeSlot>,
}

impl DoctorAvailability {
    pub fn availability_id(doctor_id: &str, date: NaiveDate) -> String {
        format!("{}_{}", doctor_id, date.format("%Y-%m-%d"))
    }

    pub fn slot_at(&self, start_time: NaiveTime) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.start_time == start_time)
    }

    pub fn slot_at_mut(&mut self, start_time: NaiveTime) -> Option<&mut TimeSlot> {
        self.time_slots.iter_mut().find(|slot| slot.start_time == start_time)
    }

    pub fn slot_by_id(&self, slot_id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn available_slots(&self) -> Vec<TimeSlot> {
        self.time_slots
            .iter()
            .filter(|slot| slot.is_available())
            .cloned()
            .collect()
    }

    pub fn blocked_count(&self) -> usize {
        self.time_slots.iter().filter(|slot| slot.is_blocked).count()
    }

    pub fn booked_count(&self) -> usize {
        self.time_slots.iter().filter(|slot| slot.is_booked).count()
    }
}

// ==============================================================================
// REQUEST DTOs
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockTimeRangeRequest {
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    pub reason: Option<String>,
}

impl BlockTimeRangeRequest {
    pub fn validate(&self) -> Result<(), DoctorError> {
        if self.start_time >= self.end_time {
            return Err(DoctorError::InvalidTimeRange {
                start: time_format::format_time(self.start_time),
                end: time_format::format_time(self.end_time),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableSlotsQuery {
    pub upcoming_only: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockOutcome {
    pub availability: DoctorAvailability,
    pub affected_slots: usize,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Doctor already registered: {0}")]
    Duplicate(String),

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Invalid time range {start}-{end}: start must be before end")]
    InvalidTimeRange { start: String, end: String },

    #[error("Time slot not found: {0}")]
    SlotNotFound(String),
}

impl From<DoctorError> for AppError {
    fn from(error: DoctorError) -> Self {
        let message = error.to_string();
        match error {
            DoctorError::NotFound(_) | DoctorError::SlotNotFound(_) => AppError::NotFound(message),
            DoctorError::Duplicate(_) => AppError::Conflict(message),
            DoctorError::InvalidWorkingHours(_) | DoctorError::InvalidTimeRange { .. } => {
                AppError::ValidationError(message)
            }
        }
    }
}
