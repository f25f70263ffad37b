use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_models::error::AppError;

use crate::services::SessionService;

/// Rejects requests unless the session is logged in, and attaches the
/// current `SessionInfo` to the request extensions for handlers to take
/// with `Extension<SessionInfo>`.
pub async fn session_middleware(
    State(session): State<SessionService>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let info = session.require_authenticated()?;
    request.extensions_mut().insert(info);

    Ok(next.run(request).await)
}
