mod common;

use actix_web::dev::Service as _;
use actix_web::{
    http::StatusCode, middleware::NormalizePath, test, web, App, HttpMessage, HttpResponse,
    Responder,
};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use careerlog_backend::auth::jwt::JwtService;
use careerlog_backend::middlewares::auth::AuthMiddleware;
use careerlog_backend::use_cases::extractors::AdminClaims;
use careerlog_backend::AppState;

use common::{claims_for, test_config, test_user};

async fn ok_stub() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

async fn admin_stub(_claims: AdminClaims) -> impl Responder {
    HttpResponse::Ok().finish()
}

fn test_state() -> web::Data<AppState> {
    let config = test_config();
    // Lazy pool so the gate can be exercised without a live database.
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .unwrap();
    web::Data::new(AppState::new(&config, pool))
}

#[actix_web::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .route("/api/v1/experiences", web::get().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/experiences").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Missing or invalid credentials");
}

#[actix_web::test]
async fn malformed_token_is_unauthorized() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .route("/api/v1/experiences", web::get().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/experiences")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Missing or invalid credentials");
}

#[actix_web::test]
async fn expired_token_is_reported_as_expired() {
    let mut expired_config = test_config();
    expired_config.jwt_expiration_minutes = -5;
    let token = JwtService::new(&expired_config)
        .create_jwt(&test_user(Uuid::new_v4(), false))
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .route("/api/v1/experiences", web::get().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/experiences")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Token has expired");
}

#[actix_web::test]
async fn valid_token_reaches_protected_route() {
    let token = JwtService::new(&test_config())
        .create_jwt(&test_user(Uuid::new_v4(), false))
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .route("/api/v1/experiences", web::get().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/experiences")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn non_admin_token_on_admin_route_is_forbidden() {
    let token = JwtService::new(&test_config())
        .create_jwt(&test_user(Uuid::new_v4(), false))
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .route("/api/v1/admin/dashboard", web::get().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Admin access required");
}

#[actix_web::test]
async fn admin_token_passes_the_admin_gate() {
    let token = JwtService::new(&test_config())
        .create_jwt(&test_user(Uuid::new_v4(), true))
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .route("/api/v1/admin/dashboard", web::get().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

// Path normalization runs before the gate, same wrap order as the server.
#[actix_web::test]
async fn trailing_slash_on_public_route_is_trimmed_before_the_gate() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .route("/api/v1/auth/login", web::post().to(ok_stub)),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/v1/auth/login/").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn admin_extractor_rejects_non_admin_claims() {
    let claims = claims_for(Uuid::new_v4(), false);

    let app = test::init_service(
        App::new()
            .wrap_fn(move |req, srv| {
                req.extensions_mut().insert(claims.clone());
                srv.call(req)
            })
            .route("/restricted", web::get().to(admin_stub)),
    )
    .await;

    let req = test::TestRequest::get().uri("/restricted").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
