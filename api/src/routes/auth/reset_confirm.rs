//! Handler for POST /api/v1/auth/password-reset/confirm

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ag_core::repositories::UserRepository;

use crate::dto::auth::{DetailResponse, PasswordResetConfirmRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::{extract_client_ip, AppState};

pub const RESET_CONFIRM_DETAIL: &str = "Password has been reset successfully.";

/// Complete a password reset with a previously issued token.
///
/// Expired, consumed, and never-issued tokens all produce the same 400;
/// password/confirmation mismatch is rejected before the token store is
/// touched.
pub async fn reset_confirm<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
    request: web::Json<PasswordResetConfirmRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    let client_ip = extract_client_ip(&req);

    match state
        .reset_service
        .confirm_reset(
            &request.token,
            &request.new_password,
            &request.new_password_confirm,
            &client_ip,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(DetailResponse::new(RESET_CONFIRM_DETAIL)),
        Err(e) => handle_domain_error(e),
    }
}
