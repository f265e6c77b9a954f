//! AlphaBrain - authentication backend
//!
//! Registers users with a username/password pair and issues signed bearer
//! tokens on successful login.

pub mod core;
