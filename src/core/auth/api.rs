//! Auth API endpoints
//!
//! - POST /auth/sign-in - Register a new user
//! - POST /auth/login - Login and get a bearer token

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use std::sync::Arc;

use crate::core::auth::{
    AuthError, AuthService, LoginRequest, SignInRequest, SignInResponse, TokenResponse,
};

/// Auth API state containing the auth service
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
    pub code: String,
}

impl ApiError {
    pub fn new(detail: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: code.into(),
        }
    }
}

/// Unreadable request bodies are reported like any other invalid input
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidInput(rejection.body_text())
    }
}

/// Convert AuthError to API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::DuplicateUser => (StatusCode::BAD_REQUEST, "USERNAME_EXISTS"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT"),
            AuthError::DirectoryUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "DIRECTORY_UNAVAILABLE")
            }
            AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        // Server-side failures are logged, not echoed to the client
        let detail = match &self {
            AuthError::DirectoryUnavailable(_) | AuthError::Internal(_) => {
                tracing::error!("Auth request failed: {}", self);
                "Service temporarily unavailable".to_string()
            }
            _ => self.to_string(),
        };

        let mut response = (status, Json(ApiError::new(detail, code))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// Create the auth API router
pub fn auth_api_router(state: AuthApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/auth/sign-in", post(sign_in_handler))
        .route("/auth/login", post(login_handler))
        .with_state(state)
}

/// POST /auth/sign-in
/// Register a new user
async fn sign_in_handler(
    State(state): State<Arc<AuthApiState>>,
    WithRejection(Json(request), _): WithRejection<Json<SignInRequest>, AuthError>,
) -> Result<Json<SignInResponse>, AuthError> {
    let username = request.username.clone();
    tracing::info!("Registration attempt for username: {}", username);

    match state.auth_service.register(request).await {
        Ok(response) => {
            tracing::info!("User registered successfully: {}", username);
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("Registration failed for username {}: {}", username, e);
            Err(e)
        }
    }
}

/// POST /auth/login
/// Login and get a bearer token
async fn login_handler(
    State(state): State<Arc<AuthApiState>>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> Result<Json<TokenResponse>, AuthError> {
    let username = request.username.clone();
    tracing::info!("Login attempt for username: {}", username);

    match state.auth_service.login(request).await {
        Ok(response) => {
            tracing::info!("User logged in successfully: {}", username);
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("Login failed for username {}: {}", username, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::jwt::{JwtConfig, JwtService};
    use crate::core::auth::password::{MIN_BCRYPT_COST, PasswordHasher};
    use crate::core::db::InMemoryUserRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TEST_SECRET: &str = "test_secret_key_for_testing_only";

    fn create_test_router() -> Router {
        let auth_service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordHasher::new(MIN_BCRYPT_COST).unwrap(),
            JwtService::new(JwtConfig::new(TEST_SECRET)).unwrap(),
        );

        auth_api_router(AuthApiState { auth_service })
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(router, uri, body.to_string()).await
    }

    async fn post_raw(router: &Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    fn credentials(username: &str, password: &str) -> Value {
        json!({"username": username, "password": password})
    }

    // ========================================================================
    // Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_register_and_login_scenario() {
        let router = create_test_router();

        let (status, body) =
            post_json(&router, "/auth/sign-in", credentials("alice", "secret1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "User created successfully"}));

        let (status, body) =
            post_json(&router, "/auth/sign-in", credentials("alice", "other")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "USERNAME_EXISTS");

        let (status, body) = post_json(&router, "/auth/login", credentials("alice", "wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        let (status, body) =
            post_json(&router, "/auth/login", credentials("alice", "secret1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");

        let token = body["access_token"].as_str().unwrap();
        let claims = JwtService::new(JwtConfig::new(TEST_SECRET))
            .unwrap()
            .validate_token(token)
            .unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[tokio::test]
    async fn test_login_failures_have_identical_responses() {
        let router = create_test_router();
        post_json(&router, "/auth/sign-in", credentials("alice", "secret1")).await;

        let (unknown_status, unknown_body) =
            post_json(&router, "/auth/login", credentials("nobody", "secret1")).await;
        let (wrong_status, wrong_body) =
            post_json(&router, "/auth/login", credentials("alice", "wrong")).await;

        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, wrong_status);
        assert_eq!(unknown_body, wrong_body);
    }

    #[tokio::test]
    async fn test_unauthorized_sets_www_authenticate() {
        let response = AuthError::InvalidCredentials.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_invalid_input_is_unprocessable() {
        let router = create_test_router();

        let (status, body) = post_json(&router, "/auth/sign-in", credentials("", "secret1")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["detail"], "Username must not be empty");
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let router = create_test_router();

        let (status, body) =
            post_json(&router, "/auth/login", json!({"username": "alice"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert!(body["detail"].as_str().unwrap().contains("password"));

        let (status, body) = post_json(
            &router,
            "/auth/sign-in",
            json!({"username": "alice", "password": 42}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_input() {
        let router = create_test_router();

        for uri in ["/auth/sign-in", "/auth/login"] {
            let (status, body) = post_raw(&router, uri, "{not json").await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["code"], "INVALID_INPUT");
            assert!(body["detail"].is_string());
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_input() {
        let router = create_test_router();

        let request = Request::builder()
            .method("POST")
            .uri("/auth/sign-in")
            .body(Body::from(credentials("alice", "secret1").to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let response = AuthError::DirectoryUnavailable("password=hunter2".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "DIRECTORY_UNAVAILABLE");
        assert!(!body["detail"].as_str().unwrap().contains("hunter2"));
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (AuthError::DuplicateUser, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                AuthError::InvalidInput("bad".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AuthError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("Something went wrong", "ERROR_CODE");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            json!({"detail": "Something went wrong", "code": "ERROR_CODE"})
        );
    }
}
