//! Authentication module for AlphaBrain
//!
//! This module provides authentication functionality including:
//! - Password hashing and verification (bcrypt)
//! - JWT bearer token issuance
//! - User registration and login
//! - REST API endpoints for auth operations

pub mod api;
pub mod jwt;
pub mod password;
pub mod service;
pub mod validation;

pub use api::{AuthApiState, auth_api_router};
pub use jwt::{Claims, IssuedToken, JwtConfig, JwtError, JwtService};
pub use password::{PasswordError, PasswordHasher};
pub use service::{
    AuthError, AuthService, LoginRequest, SignInRequest, SignInResponse, TokenResponse,
};
pub use validation::ValidationError;
