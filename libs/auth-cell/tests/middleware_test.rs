use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceExt;

use auth_cell::*;
use shared_models::auth::SessionInfo;

async fn whoami(Extension(session): Extension<SessionInfo>) -> String {
    session.role.to_string()
}

fn app(session: SessionService) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(session, session_middleware))
}

fn request() -> Request<Body> {
    Request::builder().uri("/whoami").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_rejects_when_logged_out() {
    let response = app(SessionService::in_memory()).oneshot(request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_passes_session_to_handler() {
    let session = SessionService::in_memory();
    session
        .login(LoginRequest {
            username: "doctor".to_string(),
            password: "doctor123".to_string(),
        })
        .await
        .unwrap();

    let response = app(session).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"doctor");
}
