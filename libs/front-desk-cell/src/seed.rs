//! Mock clinic data loaded at startup and on reset.
use chrono::{NaiveDate, NaiveTime};

use appointment_cell::{Appointment, AppointmentStatus};
use doctor_cell::{Doctor, WorkingHours};
use patient_cell::{Gender, Patient};

pub const DEFAULT_DOCTOR_ID: &str = "D001";

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn mock_doctors() -> Vec<Doctor> {
    vec![Doctor {
        id: DEFAULT_DOCTOR_ID.to_string(),
        name: "Dr. Anderson".to_string(),
        specialization: Some("General Medicine".to_string()),
        working_hours: WorkingHours {
            start: hm(9, 0),
            end: hm(17, 0),
            slot_duration_minutes: 30,
        },
    }]
}

pub fn mock_patients() -> Vec<Patient> {
    let patient = |id: &str, surname: &str, name: &str, gender, age, address: &str, phone: &str, registered| Patient {
        id: id.to_string(),
        patient_number: Patient::patient_number_for(id.parse().unwrap_or(0)),
        surname: surname.to_string(),
        name: name.to_string(),
        gender,
        age,
        address: address.to_string(),
        phone_number: phone.to_string(),
        registration_date: registered,
        is_new: false,
    };

    vec![
        patient(
            "1",
            "Smith",
            "John",
            Gender::Male,
            45,
            "123 Main St, New York, NY 10001",
            "+1-555-0101",
            ymd(2024, 1, 15),
        ),
        patient(
            "2",
            "Johnson",
            "Emily",
            Gender::Female,
            32,
            "456 Oak Ave, Brooklyn, NY 11201",
            "+1-555-0102",
            ymd(2024, 2, 20),
        ),
        patient(
            "3",
            "Williams",
            "Michael",
            Gender::Male,
            58,
            "789 Pine Rd, Queens, NY 11354",
            "+1-555-0103",
            ymd(2024, 3, 10),
        ),
    ]
}

pub fn mock_appointments() -> Vec<Appointment> {
    let day = ymd(2026, 1, 9);

    mock_patients()
        .into_iter()
        .zip([hm(9, 0), hm(10, 30), hm(14, 0)])
        .map(|(patient, time)| Appointment {
            id: patient.id.clone(),
            patient_name: patient.full_name(),
            patient_number: patient.patient_number,
            patient_id: patient.id,
            date: day,
            time,
            doctor_id: DEFAULT_DOCTOR_ID.to_string(),
            status: AppointmentStatus::Scheduled,
            is_new_patient: false,
            notes: None,
        })
        .collect()
}
