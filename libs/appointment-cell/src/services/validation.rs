use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use doctor_cell::{DoctorAvailability, TimeSlot};
use shared_utils::{is_date_in_past, is_time_in_past, Clock};

use crate::models::AppointmentError;

/// Booking preconditions checked before the engine is called.
#[derive(Clone)]
pub struct BookingValidator {
    clock: Arc<dyn Clock>,
}

impl BookingValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Past dates are rejected outright; on today, a time is rejected only
    /// once its minute has gone by.
    pub fn check_not_past(&self, date: NaiveDate, time: NaiveTime) -> Result<(), AppointmentError> {
        let now = self.clock.now();
        if is_date_in_past(date, now) {
            warn!("Rejected booking on past date {}", date);
            return Err(AppointmentError::PastDate(date));
        }
        if is_time_in_past(date, time, now) {
            warn!("Rejected booking at past time {} {}", date, time);
            return Err(AppointmentError::PastTime { date, time });
        }
        Ok(())
    }

    /// Checks that `time` names a free, unblocked slot of `availability`.
    /// A slot already held by `appointment_id` counts as free for it.
    pub fn check_slot(
        &self,
        availability: &DoctorAvailability,
        time: NaiveTime,
        appointment_id: Option<&str>,
    ) -> Result<(), AppointmentError> {
        self.check_not_past(availability.date, time)?;

        let slot = availability
            .slot_at(time)
            .ok_or(AppointmentError::SlotNotFound(time))?;

        if slot.is_blocked {
            return Err(AppointmentError::SlotBlocked(time));
        }

        let held_by_self = appointment_id.is_some() && slot.appointment_id.as_deref() == appointment_id;
        if slot.is_booked && !held_by_self {
            return Err(AppointmentError::SlotBooked(time));
        }
        Ok(())
    }

    /// Available slots that can still be booked right now.
    pub fn upcoming_slots(&self, availability: &DoctorAvailability) -> Vec<TimeSlot> {
        let now = self.clock.now();
        if is_date_in_past(availability.date, now) {
            return Vec::new();
        }

        availability
            .available_slots()
            .into_iter()
            .filter(|slot| !is_time_in_past(availability.date, slot.start_time, now))
            .collect()
    }
}
