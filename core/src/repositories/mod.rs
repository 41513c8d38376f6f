//! Repository interfaces for persistent collaborators.

pub mod user;

pub use user::{MockUserRepository, UserRepository};
