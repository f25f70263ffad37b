use tracing::{debug, warn};

use crate::models::{Doctor, DoctorError};

/// Static doctor configuration. Doctors are registered at start-up and never
/// removed while the process runs.
#[derive(Debug, Clone, Default)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doctors(doctors: Vec<Doctor>) -> Result<Self, DoctorError> {
        let mut directory = Self::new();
        for doctor in doctors {
            directory.register(doctor)?;
        }
        Ok(directory)
    }

    pub fn register(&mut self, doctor: Doctor) -> Result<(), DoctorError> {
        doctor.working_hours.validate()?;

        if self.contains(&doctor.id) {
            return Err(DoctorError::Duplicate(doctor.id));
        }

        debug!("Registered doctor {} ({})", doctor.id, doctor.name);
        self.doctors.push(doctor);
        Ok(())
    }

    pub fn get(&self, doctor_id: &str) -> Option<&Doctor> {
        let doctor = self.doctors.iter().find(|d| d.id == doctor_id);
        if doctor.is_none() {
            warn!("Doctor not found: {}", doctor_id);
        }
        doctor
    }

    pub fn contains(&self, doctor_id: &str) -> bool {
        self.doctors.iter().any(|d| d.id == doctor_id)
    }

    pub fn list(&self) -> &[Doctor] {
        &self.doctors
    }
}
