//! Application factory
//!
//! Builds the Actix application with all routes and middleware wired to the
//! shared service state. Test code reuses `create_app` with in-memory
//! backends; `main` wires the real ones.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use ag_core::repositories::UserRepository;

use crate::dto::auth::DetailResponse;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    login::login, profile::profile, refresh::refresh, register::register,
    reset_confirm::reset_confirm, reset_request::reset_request, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.token_service.clone());
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U>))
                    .route("/login", web::post().to(login::<U>))
                    .route("/token/refresh", web::post().to(refresh::<U>))
                    .route("/profile", web::get().to(profile::<U>).wrap(jwt_auth))
                    .route("/password-reset", web::post().to(reset_request::<U>))
                    .route(
                        "/password-reset/confirm",
                        web::post().to(reset_confirm::<U>),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "authgate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(DetailResponse::new("The requested resource was not found"))
}
