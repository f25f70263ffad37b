use axum::extract::{Extension, Json, State};
use tracing::debug;

use shared_models::auth::SessionInfo;
use shared_models::error::AppError;

use crate::models::{LoginRequest, SetRoleRequest};
use crate::services::SessionService;

pub async fn login(
    State(session): State<SessionService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionInfo>, AppError> {
    let info = session.login(request).await?;
    Ok(Json(info))
}

pub async fn get_session(State(session): State<SessionService>) -> Json<SessionInfo> {
    Json(session.session_info())
}

/// Switches the role of the logged-in session. The session the guard
/// attached is the one being changed.
pub async fn set_role(
    State(session): State<SessionService>,
    Extension(current): Extension<SessionInfo>,
    Json(request): Json<SetRoleRequest>,
) -> Json<SessionInfo> {
    debug!("Role change requested: {} -> {}", current.role, request.role);

    if current.role != request.role {
        session.set_role(request.role);
    }
    Json(session.session_info())
}
