//! Handler for POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use std::collections::HashMap;
use validator::Validate;

use ag_core::repositories::UserRepository;
use ag_core::services::auth::mask_email;

use crate::dto::auth::{AuthResponseBody, RegisterRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Register a new account and return its first token pair.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "user": { "id": "...", "email": "...", "full_name": "..." },
///     "access": "...",
///     "refresh": "...",
///     "expires_in": 900
/// }
/// ```
pub async fn register<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    if request.password != request.password_confirm {
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        fields.insert(
            "password_confirm".to_string(),
            vec!["Passwords do not match".to_string()],
        );
        return HttpResponse::BadRequest().json(fields);
    }

    log::info!("registration attempt for {}", mask_email(&request.email));

    match state
        .auth_service
        .register(&request.email, &request.full_name, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Created().json(AuthResponseBody {
            user: UserResponse::from(&auth.user),
            access: auth.tokens.access_token,
            refresh: auth.tokens.refresh_token,
            expires_in: auth.tokens.expires_in,
        }),
        Err(e) => handle_domain_error(e),
    }
}
