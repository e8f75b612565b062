use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::entities::experience::{NewExperienceRequest, UpdateExperienceRequest};
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[get("")]
pub async fn list_experiences(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.experience_handler.overview(&user_id).await {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => e.to_http_response(),
    }
}

#[post("")]
pub async fn create_experience(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: web::Json<NewExperienceRequest>,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.experience_handler.create(user_id, request.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[get("/{id}")]
pub async fn get_experience(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    claims: AuthClaims,
) -> impl Responder {
    match state.experience_handler.get(&id, &claims.0).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[put("/{id}")]
pub async fn update_experience(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    claims: AuthClaims,
    request: web::Json<UpdateExperienceRequest>,
) -> impl Responder {
    match state.experience_handler.update(&id, &claims.0, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[delete("/{id}")]
pub async fn delete_experience(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    claims: AuthClaims,
) -> impl Responder {
    match state.experience_handler.delete(&id, &claims.0).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => e.to_http_response(),
    }
}
