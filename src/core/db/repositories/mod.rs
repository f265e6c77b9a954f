//! User directory implementations
//!
//! `UserRepository` persists records in PostgreSQL; `InMemoryUserRepository`
//! keeps them in process memory.

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::UserRepository;
