use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use auth_cell::session_middleware;

use crate::handlers;
use crate::state::AppState;

pub fn front_desk_routes(state: AppState) -> Router {
    // Logout also resets the clinic context
    let protected_routes = Router::new()
        .route("/auth/logout", post(handlers::logout))

        // Doctors and their days
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/{doctor_id}/availability/{date}", get(handlers::get_availability))
        .route("/doctors/{doctor_id}/availability/{date}/generate", post(handlers::generate_availability))
        .route("/doctors/{doctor_id}/availability/{date}/available", get(handlers::get_available_slots))
        .route("/doctors/{doctor_id}/availability/{date}/blocks", post(handlers::block_time_range))
        .route("/doctors/{doctor_id}/availability/{date}/blocks/{slot_id}", delete(handlers::unblock_slot))
        .route("/availability/refresh", post(handlers::refresh_availability))
        .route("/availability/events", get(handlers::availability_events))

        // Appointments
        .route("/appointments", get(handlers::list_appointments).post(handlers::create_appointment))
        .route("/appointments/summary", get(handlers::appointment_summary))
        .route(
            "/appointments/{appointment_id}",
            get(handlers::get_appointment)
                .put(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )

        // Patients
        .route("/patients", get(handlers::list_patients).post(handlers::create_patient))
        .route("/patients/{patient_id}", get(handlers::get_patient).put(handlers::update_patient))

        .layer(middleware::from_fn_with_state(state.session.clone(), session_middleware));

    protected_routes.with_state(state)
}
