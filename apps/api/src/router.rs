use axum::{
    Router,
    routing::get,
};

use auth_cell::router::auth_routes;
use front_desk_cell::{front_desk_routes, AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Front Desk API is running!" }))
        .nest("/auth", auth_routes(state.session.clone()))
        .merge(front_desk_routes(state))
}
