//! Password-reset flow: token store adapter and orchestrator.

pub mod config;
pub mod service;
pub mod token_store;


pub use config::ResetConfig;
pub use service::ResetService;
pub use token_store::ResetTokenStore;
