//! Handler for POST /api/v1/auth/password-reset

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ag_core::repositories::UserRepository;
use ag_core::services::auth::mask_email;

use crate::dto::auth::{PasswordResetRequest, ResetRequestResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::{extract_client_ip, AppState};

/// Acknowledgment used for both known and unknown emails. Word-for-word
/// identical in the two cases so the response cannot be used to probe
/// which addresses are registered.
pub const RESET_REQUEST_DETAIL: &str =
    "If an account with that email exists, a password reset token has been issued.";

/// Begin a password reset.
///
/// Always answers 200 with the same `detail`; the `token` field is present
/// only when the email matched an account. There is no email delivery, so
/// the token rides back in the response for the caller to forward.
pub async fn reset_request<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
    request: web::Json<PasswordResetRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    let client_ip = extract_client_ip(&req);
    log::info!(
        "password reset requested for {} from {}",
        mask_email(&request.email),
        client_ip
    );

    match state
        .reset_service
        .request_reset(&request.email, &client_ip)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(ResetRequestResponse {
            detail: RESET_REQUEST_DETAIL.to_string(),
            token,
        }),
        Err(e) => handle_domain_error(e),
    }
}
