//! Handler for GET /api/v1/auth/profile

use actix_web::{web, HttpResponse};

use ag_core::repositories::UserRepository;

use crate::dto::auth::UserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Return the authenticated user's profile.
///
/// Requires the JWT middleware; the subject comes from the verified access
/// token, never from the request body.
pub async fn profile<U>(auth: AuthContext, state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(e) => handle_domain_error(e),
    }
}
