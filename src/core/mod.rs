//! Core configuration, authentication and user directory logic

pub mod auth;
pub mod config;
pub mod db;
