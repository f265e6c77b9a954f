//! Authentication service
//!
//! Provides business logic for user registration and login.
//! Coordinates between the user directory, the password hasher, and the JWT
//! service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::auth::password::{PasswordError, PasswordHasher};
use crate::core::auth::validation::{ValidationError, validate_credentials};
use crate::core::db::{DirectoryError, UserDirectory, UserRecord};

/// Token type reported to clients
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Message returned on successful registration
pub const USER_CREATED_MESSAGE: &str = "User created successfully";

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    #[error("User directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Duplicate => AuthError::DuplicateUser,
            DirectoryError::Unavailable(msg) => AuthError::DirectoryUnavailable(msg),
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Registration request data
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Login request data
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub msg: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
    jwt_service: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: PasswordHasher,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            directory,
            hasher,
            jwt_service,
        }
    }

    /// Register a new user
    pub async fn register(&self, request: SignInRequest) -> Result<SignInResponse, AuthError> {
        validate_credentials(&request.username, &request.password)?;

        // Early rejection; the directory insert below is the real guard
        if self
            .directory
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUser);
        }

        let SignInRequest { username, password } = request;
        let hasher = self.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        self.directory
            .insert(UserRecord::new(username, password_hash))
            .await?;

        Ok(SignInResponse {
            msg: USER_CREATED_MESSAGE.to_string(),
        })
    }

    /// Login an existing user.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        validate_credentials(&request.username, &request.password)?;

        let LoginRequest { username, password } = request;
        let record = self.directory.find_by_username(&username).await?;

        let hasher = self.hasher.clone();
        let is_valid = tokio::task::spawn_blocking(move || match record {
            Some(record) => hasher.verify(&password, &record.password_hash),
            None => {
                hasher.verify_dummy(&password);
                false
            }
        })
        .await?;

        if !is_valid {
            tracing::debug!("Credential check failed for login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.jwt_service.issue(&username)?;

        Ok(TokenResponse {
            access_token: issued.access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }
}
