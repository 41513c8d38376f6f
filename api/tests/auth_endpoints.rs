//! Endpoint tests over the full application factory with in-memory
//! backends: mock user store, memory cache tiers, memory rate limiter.

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};
use std::sync::Arc;

use ag_api::app::create_app;
use ag_api::routes::auth::AppState;
use ag_core::cache::{FallbackCache, MemoryCache};
use ag_core::repositories::MockUserRepository;
use ag_core::services::auth::{AuthService, MemoryRateLimiter, RateLimiterTrait};
use ag_core::services::reset::{ResetConfig, ResetService, ResetTokenStore};
use ag_core::services::token::{TokenService, TokenServiceConfig};
use ag_shared::config::rate_limit::{RateLimitConfig, ScopeLimit};

fn lenient_limits() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        login: ScopeLimit::new(100, 60),
        password_reset: ScopeLimit::new(100, 3600),
    }
}

fn test_state(limits: RateLimitConfig) -> web::Data<AppState<MockUserRepository>> {
    let users = Arc::new(MockUserRepository::new());
    let limiter: Arc<dyn RateLimiterTrait> = Arc::new(MemoryRateLimiter::new(limits));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::default()));

    let cache = Arc::new(FallbackCache::new(
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryCache::new()),
    ));

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        token_service.clone(),
        limiter.clone(),
    ));
    let reset_service = Arc::new(ResetService::new(
        users,
        ResetTokenStore::new(cache, ResetConfig::default()),
        limiter,
    ));

    web::Data::new(AppState {
        auth_service,
        reset_service,
        token_service,
    })
}

fn register_body(email: &str) -> Value {
    json!({
        "email": email,
        "full_name": "Test User",
        "password": "correct-horse-9",
        "password_confirm": "correct-horse-9",
    })
}

#[actix_web::test]
async fn test_register_creates_account() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("new@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "new@example.com");
    assert!(body["access"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
async fn test_register_rejects_duplicate_email() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("dup@example.com"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("dup@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["email"].is_array());
}

#[actix_web::test]
async fn test_register_rejects_password_mismatch() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": "mismatch@example.com",
            "full_name": "Test User",
            "password": "correct-horse-9",
            "password_confirm": "other-pass-9",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["password_confirm"].is_array());
}

#[actix_web::test]
async fn test_register_rejects_short_password() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": "short@example.com",
            "full_name": "Test User",
            "password": "short",
            "password_confirm": "short",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["password"].is_array());
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("known@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    // Wrong password for a known account.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "known@example.com", "password": "wrong-pass-9"}))
        .to_request();
    let wrong_password = test::call_service(&app, req).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: Value = test::read_body_json(wrong_password).await;

    // Unknown account entirely.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "stranger@example.com", "password": "wrong-pass-9"}))
        .to_request();
    let unknown = test::call_service(&app, req).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = test::read_body_json(unknown).await;

    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["detail"], "Invalid credentials");
}

#[actix_web::test]
async fn test_login_rate_limit_answers_429() {
    let app = test::init_service(create_app(test_state(RateLimitConfig {
        enabled: true,
        login: ScopeLimit::new(2, 60),
        password_reset: ScopeLimit::new(100, 3600),
    })))
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "a@example.com", "password": "guess-pass-9"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "a@example.com", "password": "guess-pass-9"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_refresh_rotates_and_rejects_garbage() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("refresh@example.com"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let refresh = body["refresh"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token/refresh")
        .set_json(json!({"refresh": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: Value = test::read_body_json(resp).await;
    assert!(rotated["access"].as_str().is_some_and(|t| !t.is_empty()));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token/refresh")
        .set_json(json!({"refresh": "not-a-token"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("access-as-refresh@example.com"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let access = body["access"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token/refresh")
        .set_json(json!({"refresh": access}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_profile_requires_valid_token() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("me@example.com"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let access = body["access"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["email"], "me@example.com");
    assert_eq!(profile["full_name"], "Test User");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    match resp {
        Ok(resp) => assert_eq!(resp.status(), StatusCode::UNAUTHORIZED),
        Err(e) => assert_eq!(
            e.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        ),
    }
}

#[actix_web::test]
async fn test_reset_request_responses_are_symmetric() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("present@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset")
        .set_json(json!({"email": "present@example.com"}))
        .to_request();
    let hit = test::call_service(&app, req).await;
    assert_eq!(hit.status(), StatusCode::OK);
    let hit_body: Value = test::read_body_json(hit).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset")
        .set_json(json!({"email": "absent@example.com"}))
        .to_request();
    let miss = test::call_service(&app, req).await;
    assert_eq!(miss.status(), StatusCode::OK);
    let miss_body: Value = test::read_body_json(miss).await;

    // Same detail word for word; only the token field differs.
    assert_eq!(hit_body["detail"], miss_body["detail"]);
    assert!(hit_body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(miss_body.get("token").is_none() || miss_body["token"].is_null());
}

#[actix_web::test]
async fn test_full_reset_flow_over_http() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_body("cycle@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset")
        .set_json(json!({"email": "cycle@example.com"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .set_json(json!({
            "token": token,
            "new_password": "rotated-pass-9",
            "new_password_confirm": "rotated-pass-9",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The old password no longer authenticates; the new one does.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "cycle@example.com", "password": "correct-horse-9"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "cycle@example.com", "password": "rotated-pass-9"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Replaying the consumed token is a generic 400.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .set_json(json!({
            "token": token,
            "new_password": "third-pass-9",
            "new_password_confirm": "third-pass-9",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"]
        .as_str()
        .is_some_and(|d| d.contains("Invalid or expired token")));
}

#[actix_web::test]
async fn test_reset_confirm_mismatch_is_field_error() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .set_json(json!({
            "token": "whatever",
            "new_password": "rotated-pass-9",
            "new_password_confirm": "different-pass-9",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["new_password_confirm"].is_array());
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(create_app(test_state(lenient_limits()))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
