// libs/appointment-cell/src/services/booking.rs
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use doctor_cell::{AvailabilityStore, BookingLookup, DoctorAvailability};
use notification_cell::{AvailabilityChangeBus, AvailabilityObserverRegistry};

use crate::models::Appointment;
use crate::services::ledger::AppointmentLedger;

/// Keeps the appointment list and the availability cache in step.
///
/// The engine does not check whether a slot is free or in the past; callers
/// run [`crate::services::BookingValidator`] first.
#[derive(Clone)]
pub struct AppointmentBookingService {
    ledger: AppointmentLedger,
    bus: AvailabilityChangeBus,
}

impl AppointmentBookingService {
    pub fn new(bus: AvailabilityChangeBus) -> Self {
        Self::with_appointments(bus, Vec::new())
    }

    pub fn with_appointments(bus: AvailabilityChangeBus, appointments: Vec<Appointment>) -> Self {
        Self {
            ledger: AppointmentLedger::new(appointments),
            bus,
        }
    }

    pub fn ledger(&self) -> &AppointmentLedger {
        &self.ledger
    }

    /// Records the appointment and marks its slot. `None` when the doctor is
    /// unknown, in which case nothing is recorded.
    pub fn book(&mut self, appointment: Appointment, store: &mut AvailabilityStore) -> Option<String> {
        debug!(
            "Booking {} for doctor {} on {} at {}",
            appointment.id, appointment.doctor_id, appointment.date, appointment.time
        );

        if store.doctor(&appointment.doctor_id).is_none() {
            warn!("Cannot book {}: doctor {} not found", appointment.id, appointment.doctor_id);
            return None;
        }

        let doctor_id = appointment.doctor_id.clone();
        let date = appointment.date;
        let appointment_id = appointment.id.clone();
        self.ledger.push(appointment.clone());

        if let Some(cached) = store.get(&doctor_id, date, &self.ledger) {
            let mut availability = cached.clone();
            if appointment.is_active() {
                hold_slot(&mut availability, &appointment);
            }
            store.update(availability);
        }
        self.bus.publish(&doctor_id, date);

        info!("Booked appointment {} for patient {}", appointment_id, appointment.patient_number);
        Some(appointment_id)
    }

    /// Replaces the stored appointment carrying `updated.id`, releasing the
    /// old slot before holding the new one. `None` when the id is unknown.
    pub fn reschedule(&mut self, updated: Appointment, store: &mut AvailabilityStore) -> Option<Appointment> {
        let previous = match self.ledger.replace(updated.clone()) {
            Some(previous) => previous,
            None => {
                warn!("Cannot reschedule unknown appointment {}", updated.id);
                return None;
            }
        };

        debug!(
            "Rescheduling {} from {} {} to {} {}",
            updated.id, previous.date, previous.time, updated.date, updated.time
        );

        let same_day = previous.doctor_id == updated.doctor_id && previous.date == updated.date;
        if same_day {
            // One copy, both edits, one write.
            if let Some(cached) = store.get(&updated.doctor_id, updated.date, &self.ledger) {
                let mut availability = cached.clone();
                release_slot(&mut availability, previous.time, &self.ledger);
                if updated.is_active() {
                    hold_slot(&mut availability, &updated);
                }
                store.update(availability);
            }
            self.bus.publish(&updated.doctor_id, updated.date);
        } else {
            if let Some(cached) = store.get_if_exists(&previous.doctor_id, previous.date) {
                let mut availability = cached.clone();
                release_slot(&mut availability, previous.time, &self.ledger);
                store.update(availability);
            }
            self.bus.publish(&previous.doctor_id, previous.date);

            if let Some(cached) = store.get(&updated.doctor_id, updated.date, &self.ledger) {
                let mut availability = cached.clone();
                if updated.is_active() {
                    hold_slot(&mut availability, &updated);
                }
                store.update(availability);
            }
            self.bus.publish(&updated.doctor_id, updated.date);
        }

        info!("Updated appointment {} ({})", updated.id, updated.status);
        Some(previous)
    }

    /// Removes the appointment and frees its slot if that day is cached.
    pub fn cancel(&mut self, appointment_id: &str, store: &mut AvailabilityStore) -> Option<Appointment> {
        let removed = match self.ledger.remove(appointment_id) {
            Some(removed) => removed,
            None => {
                warn!("Cannot cancel unknown appointment {}", appointment_id);
                return None;
            }
        };

        if let Some(cached) = store.get_if_exists(&removed.doctor_id, removed.date) {
            let mut availability = cached.clone();
            release_slot(&mut availability, removed.time, &self.ledger);
            store.update(availability);
        }
        self.bus.publish(&removed.doctor_id, removed.date);

        info!("Cancelled appointment {} on {} at {}", removed.id, removed.date, removed.time);
        Some(removed)
    }

    pub fn reset(&mut self, appointments: Vec<Appointment>) {
        debug!("Resetting appointment ledger to {} entries", appointments.len());
        self.ledger.reset(appointments);
    }
}

fn hold_slot(availability: &mut DoctorAvailability, appointment: &Appointment) {
    match availability.slot_at_mut(appointment.time) {
        Some(slot) => slot.mark_booked(&appointment.id),
        None => warn!(
            "No slot starts at {} in {}; appointment {} holds no slot",
            appointment.time, availability.id, appointment.id
        ),
    }
}

/// Frees the slot at `time`, unless another active appointment still sits
/// there, in which case the slot is handed to it.
fn release_slot(availability: &mut DoctorAvailability, time: NaiveTime, ledger: &AppointmentLedger) {
    let doctor_id = availability.doctor_id.clone();
    let date: NaiveDate = availability.date;

    if let Some(slot) = availability.slot_at_mut(time) {
        match ledger.active_booking(&doctor_id, date, time) {
            Some(other) => slot.mark_booked(&other),
            None => slot.release(),
        }
    }
}
