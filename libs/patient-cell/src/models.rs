use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: String,
    pub patient_number: String,
    pub surname: String,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub address: String,
    pub phone_number: String,
    pub registration_date: NaiveDate,
    #[serde(default)]
    pub is_new: bool,
}

impl Patient {
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Patient numbers are `P` followed by the 1-based registration position,
    /// zero-padded to three digits.
    pub fn patient_number_for(position: usize) -> String {
        format!("P{:03}", position)
    }

    /// Case-insensitive match against number, names and phone. `needle` must
    /// already be trimmed and lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.patient_number.to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.surname.to_lowercase().contains(needle)
            || self.full_name().to_lowercase().contains(needle)
            || self.phone_number.contains(needle)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub surname: String,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub address: String,
    pub phone_number: String,
}

impl CreatePatientRequest {
    pub fn validate(&self) -> Result<(), PatientError> {
        let required = [
            ("surname", &self.surname),
            ("name", &self.name),
            ("address", &self.address),
            ("phone_number", &self.phone_number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(PatientError::ValidationError(format!("{} is required", field)));
            }
        }
        if self.age == 0 {
            return Err(PatientError::ValidationError("age is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub is_new: Option<bool>,
}

impl UpdatePatientRequest {
    /// Fields that are set must not be blank.
    pub fn validate(&self) -> Result<(), PatientError> {
        let provided = [
            ("surname", &self.surname),
            ("name", &self.name),
            ("address", &self.address),
            ("phone_number", &self.phone_number),
        ];
        for (field, value) in provided {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(PatientError::ValidationError(format!("{} must not be blank", field)));
            }
        }
        if self.age == Some(0) {
            return Err(PatientError::ValidationError("age must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<PatientError> for AppError {
    fn from(error: PatientError) -> Self {
        match error {
            PatientError::NotFound(_) => AppError::NotFound(error.to_string()),
            PatientError::ValidationError(message) => AppError::ValidationError(message),
        }
    }
}
