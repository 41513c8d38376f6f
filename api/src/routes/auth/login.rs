//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ag_core::repositories::UserRepository;
use ag_core::services::auth::mask_email;

use crate::dto::auth::{AuthResponseBody, LoginRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::{extract_client_ip, AppState};

/// Authenticate with email and password.
///
/// Failures are uniformly 401 with a generic detail; the `login` rate scope
/// is consulted (and consumed) before credentials are checked.
pub async fn login<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    let client_ip = extract_client_ip(&req);
    log::info!(
        "login attempt for {} from {}",
        mask_email(&request.email),
        client_ip
    );

    match state
        .auth_service
        .login(&request.email, &request.password, &client_ip)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(AuthResponseBody {
            user: UserResponse::from(&auth.user),
            access: auth.tokens.access_token,
            refresh: auth.tokens.refresh_token,
            expires_in: auth.tokens.expires_in,
        }),
        Err(e) => handle_domain_error(e),
    }
}
