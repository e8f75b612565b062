use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::experience::{CategoryCount, ExperienceResponse};
use crate::entities::user::PublicUser;
use crate::repositories::experience::ExperienceRepository;
use crate::repositories::user::UserRepository;
use crate::use_cases::extractors::AdminClaims;
use crate::AppState;

#[derive(Debug, Serialize)]
struct AdminDashboard {
    user_count: u64,
    experience_count: i64,
    total_hours: i64,
    top_categories: Vec<CategoryCount>,
}

#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<AppState>,
    _admin: AdminClaims,
) -> impl Responder {
    let user_repo = &state.auth_handler.user_repo;
    let experience_repo = &state.experience_handler.experience_repo;

    let user_count = match user_repo.count_users().await {
        Ok(count) => count,
        Err(e) => return e.to_http_response(),
    };
    let experience_count = match experience_repo.count_all().await {
        Ok(count) => count,
        Err(e) => return e.to_http_response(),
    };
    let total_hours = match experience_repo.total_hours_all().await {
        Ok(hours) => hours,
        Err(e) => return e.to_http_response(),
    };
    let top_categories = match experience_repo.category_counts_all().await {
        Ok(categories) => categories,
        Err(e) => return e.to_http_response(),
    };

    HttpResponse::Ok().json(AdminDashboard {
        user_count,
        experience_count,
        total_hours,
        top_categories,
    })
}

#[get("/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    _admin: AdminClaims,
) -> impl Responder {
    match state.auth_handler.user_repo.list_users().await {
        Ok(users) => {
            let users: Vec<PublicUser> = users.into_iter().map(PublicUser::from).collect();
            HttpResponse::Ok().json(users)
        }
        Err(e) => e.to_http_response(),
    }
}

#[get("/users/{id}/experiences")]
pub async fn user_experiences(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    _admin: AdminClaims,
) -> impl Responder {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    match state.experience_handler.experience_repo.list_for_user(&id, true).await {
        Ok(entries) => {
            let entries: Vec<ExperienceResponse> = entries
                .into_iter()
                .map(|e| ExperienceResponse::from_experience(e, &today))
                .collect();
            HttpResponse::Ok().json(entries)
        }
        Err(e) => e.to_http_response(),
    }
}
