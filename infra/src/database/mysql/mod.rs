//! MySQL implementations of core repository traits

pub mod user_repository_impl;

pub use user_repository_impl::MySqlUserRepository;
