use actix_web::{post, web, HttpResponse, Responder};

use crate::entities::analysis::{CompanyAnalyzeRequest, CoverLetterRequest, ResumeRequest};
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[post("/portfolio")]
pub async fn analyze_portfolio(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.analysis_handler.analyze_portfolio(&user_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/company")]
pub async fn analyze_company_fit(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: web::Json<CompanyAnalyzeRequest>,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.analysis_handler.analyze_company_fit(&user_id, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/resume")]
pub async fn generate_resume(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: Option<web::Json<ResumeRequest>>,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    // Body is optional; an empty request produces an untargeted blurb.
    let request = request.map(web::Json::into_inner).unwrap_or_default();

    match state.analysis_handler.generate_resume(&user_id, request).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/cover-letter")]
pub async fn generate_cover_letter(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: web::Json<CoverLetterRequest>,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.analysis_handler.generate_cover_letter(&user_id, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}
