//! Handler for POST /api/v1/auth/token/refresh

use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_core::repositories::UserRepository;

use crate::dto::auth::{RefreshRequest, TokenPairResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Exchange a valid refresh token for a fresh token pair.
pub async fn refresh<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.refresh_tokens(&request.refresh) {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse {
            access: pair.access_token,
            refresh: pair.refresh_token,
            expires_in: pair.expires_in,
        }),
        Err(e) => handle_domain_error(e),
    }
}
