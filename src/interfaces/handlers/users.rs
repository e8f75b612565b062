use actix_web::{delete, get, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::entities::user::PublicUser;
use crate::errors::AppError;
use crate::repositories::user::UserRepository;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[get("/users/me")]
pub async fn current_user(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> impl Responder {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    match state.auth_handler.user_repo.get_user_by_id(&user_id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(PublicUser::from(user)),
        Ok(None) => AppError::NotFound("User not found".to_string()).to_http_response(),
        Err(e) => e.to_http_response(),
    }
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    claims: AuthClaims,
) -> impl Responder {
    let current_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    let requesting_user = match state.auth_handler.user_repo.get_user_by_id(&current_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return AppError::NotFound("User not found".to_string()).to_http_response(),
        Err(e) => return e.to_http_response(),
    };

    match state.auth_handler.delete_user(user_id.into_inner(), &requesting_user).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => e.to_http_response(),
    }
}
