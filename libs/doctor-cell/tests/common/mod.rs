#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};

use doctor_cell::*;
use shared_utils::test_utils::time;

pub fn anderson() -> Doctor {
    Doctor {
        id: "D001".to_string(),
        name: "Dr. Anderson".to_string(),
        specialization: Some("General Medicine".to_string()),
        working_hours: WorkingHours::new(time("09:00"), time("17:00"), 30).unwrap(),
    }
}

pub fn store() -> AvailabilityStore {
    AvailabilityStore::new(DoctorDirectory::with_doctors(vec![anderson()]).unwrap())
}

/// Fixed set of (doctor, date, time, appointment id) bookings.
#[derive(Default)]
pub struct Bookings(pub Vec<(String, NaiveDate, NaiveTime, String)>);

impl Bookings {
    pub fn with(mut self, doctor_id: &str, date: NaiveDate, at: &str, appointment_id: &str) -> Self {
        self.0.push((doctor_id.to_string(), date, time(at), appointment_id.to_string()));
        self
    }
}

impl BookingLookup for Bookings {
    fn active_booking(&self, doctor_id: &str, date: NaiveDate, start_time: NaiveTime) -> Option<String> {
        self.0
            .iter()
            .find(|(d, day, at, _)| d == doctor_id && *day == date && *at == start_time)
            .map(|(_, _, _, id)| id.clone())
    }
}
