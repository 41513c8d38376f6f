//! Authentication route handlers:
//! registration, login, token refresh, profile reads, and the two-step
//! password reset flow.

use std::sync::Arc;

use actix_web::HttpRequest;

use ag_core::repositories::UserRepository;
use ag_core::services::auth::AuthService;
use ag_core::services::reset::ResetService;
use ag_core::services::token::TokenService;

pub mod login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod reset_confirm;
pub mod reset_request;

/// Application state that holds shared services
pub struct AppState<U: UserRepository> {
    pub auth_service: Arc<AuthService<U>>,
    pub reset_service: Arc<ResetService<U>>,
    pub token_service: Arc<TokenService>,
}

/// Resolve the client key used for rate limiting.
///
/// Prefers proxy headers so budgets attach to the real client rather than
/// the load balancer, then falls back to the peer address.
pub(crate) fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
