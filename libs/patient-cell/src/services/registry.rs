use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::models::{CreatePatientRequest, Patient, PatientError, UpdatePatientRequest};

/// In-memory patient list, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
}

impl PatientRegistry {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self { patients }
    }

    pub fn list(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn get(&self, patient_id: &str) -> Option<&Patient> {
        let found = self.patients.iter().find(|p| p.id == patient_id);
        if found.is_none() {
            warn!("Patient {} not found", patient_id);
        }
        found
    }

    /// Registers a new patient, numbered after the current list length and
    /// flagged as new.
    pub fn register(
        &mut self,
        request: CreatePatientRequest,
        registration_date: NaiveDate,
    ) -> Result<Patient, PatientError> {
        request.validate()?;

        let patient = Patient {
            id: Patient::new_id(),
            patient_number: Patient::patient_number_for(self.patients.len() + 1),
            surname: request.surname.trim().to_string(),
            name: request.name.trim().to_string(),
            gender: request.gender,
            age: request.age,
            address: request.address.trim().to_string(),
            phone_number: request.phone_number.trim().to_string(),
            registration_date,
            is_new: true,
        };

        info!("Registered patient {} ({})", patient.patient_number, patient.full_name());
        self.patients.push(patient.clone());
        Ok(patient)
    }

    pub fn update(&mut self, patient_id: &str, request: UpdatePatientRequest) -> Result<Patient, PatientError> {
        debug!("Updating patient {}", patient_id);
        request.validate()?;

        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        if let Some(surname) = request.surname {
            patient.surname = surname.trim().to_string();
        }
        if let Some(name) = request.name {
            patient.name = name.trim().to_string();
        }
        if let Some(gender) = request.gender {
            patient.gender = gender;
        }
        if let Some(age) = request.age {
            patient.age = age;
        }
        if let Some(address) = request.address {
            patient.address = address.trim().to_string();
        }
        if let Some(phone_number) = request.phone_number {
            patient.phone_number = phone_number.trim().to_string();
        }
        if let Some(is_new) = request.is_new {
            patient.is_new = is_new;
        }

        Ok(patient.clone())
    }

    /// Blank queries match nothing.
    pub fn search(&self, query: &str) -> Vec<Patient> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let found: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| p.matches(&needle))
            .cloned()
            .collect();
        debug!("Patient search '{}' matched {}", needle, found.len());
        found
    }

    pub fn reset(&mut self, patients: Vec<Patient>) {
        self.patients = patients;
    }
}
