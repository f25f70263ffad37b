use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::middleware::session_middleware;
use crate::services::SessionService;

pub fn auth_routes(session: SessionService) -> Router {
    let public_routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/session", get(handlers::get_session));

    let protected_routes = Router::new()
        .route("/role", post(handlers::set_role))
        .layer(middleware::from_fn_with_state(session.clone(), session_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(session)
}
