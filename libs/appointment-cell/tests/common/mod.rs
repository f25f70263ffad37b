#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use appointment_cell::*;
use doctor_cell::{AvailabilityStore, Doctor, DoctorDirectory, WorkingHours};
use notification_cell::{AvailabilityChangeBus, Subscription};
use shared_utils::test_utils::{seed_date, time};

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

pub fn appointment(id: &str, date: NaiveDate, at: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        patient_id: "1".to_string(),
        patient_number: "P001".to_string(),
        patient_name: "John Smith".to_string(),
        date,
        time: time(at),
        doctor_id: "D001".to_string(),
        status: AppointmentStatus::Scheduled,
        is_new_patient: false,
        notes: None,
    }
}

pub fn seed_appointment(id: &str, at: &str) -> Appointment {
    appointment(id, seed_date(), at)
}

/// Records every (doctor, date) published on the bus.
pub fn record(bus: &AvailabilityChangeBus) -> (Arc<Mutex<Vec<(String, NaiveDate)>>>, Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = bus.subscribe_fn(move |doctor_id, date| {
        sink.lock().unwrap().push((doctor_id.to_string(), date));
        Ok(())
    });
    (seen, subscription)
}
