//! Infrastructure service implementations

pub mod auth;
