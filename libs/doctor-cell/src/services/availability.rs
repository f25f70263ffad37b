use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{Doctor, DoctorAvailability};
use crate::services::doctor::DoctorDirectory;
use crate::services::slots::{generate_time_slots, BookingLookup};

/// Cache of generated availability, one entry per (doctor, date), keyed by
/// `"{doctor_id}_{date}"`.
///
/// Reads through [`AvailabilityStore::get`] are get-or-create: the first read
/// for a (doctor, date) generates and caches the day, and later reads return
/// that same entry until it is updated or regenerated.
#[derive(Debug, Clone)]
pub struct AvailabilityStore {
    doctors: DoctorDirectory,
    entries: HashMap<String, DoctorAvailability>,
}

impl AvailabilityStore {
    pub fn new(doctors: DoctorDirectory) -> Self {
        Self {
            doctors,
            entries: HashMap::new(),
        }
    }

    pub fn doctors(&self) -> &DoctorDirectory {
        &self.doctors
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.get(doctor_id)
    }

    /// Returns the cached day, generating and caching it on first access.
    /// `None` only when the doctor is unknown.
    pub fn get(
        &mut self,
        doctor_id: &str,
        date: NaiveDate,
        bookings: &dyn BookingLookup,
    ) -> Option<&DoctorAvailability> {
        let key = DoctorAvailability::availability_id(doctor_id, date);

        if !self.entries.contains_key(&key) {
            let doctor = self.doctors.get(doctor_id)?;
            debug!("Materializing availability {}", key);

            let availability = DoctorAvailability {
                id: key.clone(),
                doctor_id: doctor_id.to_string(),
                date,
                time_slots: generate_time_slots(doctor, date, bookings, None),
            };
            self.entries.insert(key.clone(), availability);
        }

        self.entries.get(&key)
    }

    /// Read without materializing a missing day.
    pub fn get_if_exists(&self, doctor_id: &str, date: NaiveDate) -> Option<&DoctorAvailability> {
        self.entries
            .get(&DoctorAvailability::availability_id(doctor_id, date))
    }

    /// Re-runs slot generation for the day, keeping block state from the
    /// cached slots, and replaces the entry under the same id.
    pub fn regenerate(
        &mut self,
        doctor_id: &str,
        date: NaiveDate,
        bookings: &dyn BookingLookup,
    ) -> Option<&DoctorAvailability> {
        let doctor = self.doctors.get(doctor_id)?;
        let key = DoctorAvailability::availability_id(doctor_id, date);

        let previous = self.entries.get(&key).map(|entry| entry.time_slots.as_slice());
        let time_slots = generate_time_slots(doctor, date, bookings, previous);
        debug!("Regenerated {} slots for {}", time_slots.len(), key);

        self.entries.insert(
            key.clone(),
            DoctorAvailability {
                id: key.clone(),
                doctor_id: doctor_id.to_string(),
                date,
                time_slots,
            },
        );

        self.entries.get(&key)
    }

    /// Replaces the cached entry carrying the same id. Returns false, leaving
    /// the cache untouched, when no such entry exists.
    pub fn update(&mut self, availability: DoctorAvailability) -> bool {
        match self.entries.get_mut(&availability.id) {
            Some(entry) => {
                *entry = availability;
                true
            }
            None => {
                warn!("Ignoring update for uncached availability {}", availability.id);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} cached availability entries", self.entries.len());
        self.entries.clear();
    }
}
