//! Database access: connection pooling and the MySQL user store.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::DatabasePool;
pub use mysql::MySqlUserRepository;
