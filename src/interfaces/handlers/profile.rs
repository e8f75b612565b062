use actix_web::{get, put, web, HttpResponse, Responder};

use crate::entities::profile::UpdateProfileRequest;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[get("")]
pub async fn get_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.profile_handler.get(&user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_http_response(),
    }
}

#[put("")]
pub async fn update_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.profile_handler.update(&user_id, request.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_http_response(),
    }
}
