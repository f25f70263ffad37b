use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::NaiveDate;
use futures::stream::{self, Stream};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use appointment_cell::{
    Appointment, AppointmentSearchQuery, BookAppointmentRequest, DailyAppointmentSummary, UpdateAppointmentRequest,
};
use doctor_cell::{AvailableSlotsQuery, BlockOutcome, BlockTimeRangeRequest, Doctor, DoctorAvailability, DoctorError, TimeSlot};
use notification_cell::AvailabilityBroadcaster;
use patient_cell::{CreatePatientRequest, Patient, PatientError, PatientSearchQuery, UpdatePatientRequest};
use shared_models::error::AppError;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date: Option<NaiveDate>,
}

// ==============================================================================
// SESSION
// ==============================================================================

pub async fn logout(State(state): State<AppState>) -> Json<Value> {
    state.session.logout();

    let reset = state.config.reset_on_logout;
    if reset {
        state.context.write().await.reset();
    }

    Json(json!({ "logged_out": true, "reset": reset }))
}

// ==============================================================================
// DOCTORS AND AVAILABILITY
// ==============================================================================

pub async fn list_doctors(State(state): State<AppState>) -> Json<Vec<Doctor>> {
    let doctors = state.context.read().await.doctors().to_vec();
    Json(doctors)
}

pub async fn get_availability(
    State(state): State<AppState>,
    Path((doctor_id, date)): Path<(String, NaiveDate)>,
) -> Result<Json<DoctorAvailability>, AppError> {
    debug!("Fetching availability for {} on {}", doctor_id, date);

    let availability = state.context.write().await.get_doctor_availability(&doctor_id, date);
    availability
        .map(Json)
        .ok_or_else(|| DoctorError::NotFound(doctor_id).into())
}

pub async fn generate_availability(
    State(state): State<AppState>,
    Path((doctor_id, date)): Path<(String, NaiveDate)>,
) -> Result<Json<DoctorAvailability>, AppError> {
    let availability = state.context.write().await.generate_time_slots(&doctor_id, date);
    availability
        .map(Json)
        .ok_or_else(|| DoctorError::NotFound(doctor_id).into())
}

pub async fn get_available_slots(
    State(state): State<AppState>,
    Path((doctor_id, date)): Path<(String, NaiveDate)>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let mut context = state.context.write().await;
    if context.doctor(&doctor_id).is_none() {
        return Err(DoctorError::NotFound(doctor_id).into());
    }

    let slots = if query.upcoming_only.unwrap_or(false) {
        context.get_upcoming_time_slots(&doctor_id, date)
    } else {
        context.get_available_time_slots(&doctor_id, date)
    };
    Ok(Json(slots))
}

pub async fn block_time_range(
    State(state): State<AppState>,
    Path((doctor_id, date)): Path<(String, NaiveDate)>,
    Json(request): Json<BlockTimeRangeRequest>,
) -> Result<Json<BlockOutcome>, AppError> {
    request.validate()?;

    let outcome = state.context.write().await.block_time_slot(
        &doctor_id,
        date,
        request.start_time,
        request.end_time,
        request.reason,
    );
    outcome
        .map(Json)
        .ok_or_else(|| DoctorError::NotFound(doctor_id).into())
}

pub async fn unblock_slot(
    State(state): State<AppState>,
    Path((doctor_id, date, slot_id)): Path<(String, NaiveDate, String)>,
) -> Result<Json<DoctorAvailability>, AppError> {
    let availability = state
        .context
        .write()
        .await
        .unblock_time_slot(&doctor_id, date, &slot_id)?;
    availability
        .map(Json)
        .ok_or_else(|| DoctorError::NotFound(doctor_id).into())
}

pub async fn refresh_availability(State(state): State<AppState>) -> Json<Value> {
    let revision = state.context.write().await.refresh_availability();
    Json(json!({ "revision": revision }))
}

/// Streams every availability change as an `availability` event.
pub async fn availability_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.events.subscribe();
    debug!("Availability stream opened ({} listeners)", state.events.receiver_count());

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => match AvailabilityBroadcaster::to_json(&event) {
                    Ok(data) => {
                        let sse = Event::default()
                            .event("availability")
                            .id(event.sequence.to_string())
                            .data(data);
                        return Some((Ok(sse), receiver));
                    }
                    Err(e) => warn!("Dropping availability event {}: {}", event.sequence, e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Availability stream lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Json<Vec<Appointment>> {
    let appointments = state.context.read().await.appointments(&query);
    Json(appointments)
}

pub async fn appointment_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Json<DailyAppointmentSummary> {
    let context = state.context.read().await;
    let date = query.date.unwrap_or_else(|| context.today());
    Json(context.daily_summary(date))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state.context.read().await.appointment(&appointment_id).cloned();
    appointment
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Appointment not found: {}", appointment_id)))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = state.context.write().await.book_appointment(request)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .context
        .write()
        .await
        .change_appointment(&appointment_id, request)?;
    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let removed = state.context.write().await.cancel_appointment(&appointment_id)?;
    Ok(Json(removed))
}

// ==============================================================================
// PATIENTS
// ==============================================================================

pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientSearchQuery>,
) -> Json<Vec<Patient>> {
    let context = state.context.read().await;
    let patients = match query.q {
        Some(q) => context.search_patients(&q),
        None => context.patients().to_vec(),
    };
    Json(patients)
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = state.context.write().await.register_patient(request)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let patient = state.context.read().await.patient(&patient_id).cloned();
    patient
        .map(Json)
        .ok_or_else(|| PatientError::NotFound(patient_id).into())
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    let patient = state.context.write().await.update_patient(&patient_id, request)?;
    Ok(Json(patient))
}
