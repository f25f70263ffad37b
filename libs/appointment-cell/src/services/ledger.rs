use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use doctor_cell::BookingLookup;

use crate::models::{Appointment, AppointmentSearchQuery, DailyAppointmentSummary};

/// The appointment list, in booking order.
#[derive(Debug, Clone, Default)]
pub struct AppointmentLedger {
    appointments: Vec<Appointment>,
}

impl AppointmentLedger {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn get(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == appointment_id)
    }

    pub(crate) fn push(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    /// Swaps in `updated` for the record with the same id and hands back the
    /// previous version.
    pub(crate) fn replace(&mut self, updated: Appointment) -> Option<Appointment> {
        let entry = self.appointments.iter_mut().find(|a| a.id == updated.id)?;
        Some(std::mem::replace(entry, updated))
    }

    pub(crate) fn remove(&mut self, appointment_id: &str) -> Option<Appointment> {
        let index = self.appointments.iter().position(|a| a.id == appointment_id)?;
        Some(self.appointments.remove(index))
    }

    pub(crate) fn reset(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
    }

    /// Appointments matching every filter that is set, ordered by date then time.
    pub fn search(&self, query: &AppointmentSearchQuery) -> Vec<Appointment> {
        let mut found: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| query.date.map_or(true, |date| a.date == date))
            .filter(|a| query.doctor_id.as_deref().map_or(true, |id| a.doctor_id == id))
            .filter(|a| query.status.map_or(true, |status| a.status == status))
            .cloned()
            .collect();

        found.sort_by_key(|a| (a.date, a.time));
        debug!("Appointment search matched {} of {}", found.len(), self.appointments.len());
        found
    }

    pub fn daily_summary(&self, date: NaiveDate) -> DailyAppointmentSummary {
        let day: Vec<&Appointment> = self.appointments.iter().filter(|a| a.date == date).collect();
        let new_patients = day.iter().filter(|a| a.is_new_patient).count();

        DailyAppointmentSummary {
            date,
            total: day.len(),
            new_patients,
            returning_patients: day.len() - new_patients,
        }
    }
}

impl BookingLookup for AppointmentLedger {
    fn active_booking(&self, doctor_id: &str, date: NaiveDate, start_time: NaiveTime) -> Option<String> {
        self.appointments
            .iter()
            .find(|a| a.occupies(doctor_id, date, start_time))
            .map(|a| a.id.clone())
    }
}
