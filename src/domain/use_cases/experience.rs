use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::entities::experience::{
    Experience, ExperienceOverview, ExperienceResponse, NewExperienceRequest,
    NewExperienceResponse, UpdateExperienceRequest,
};
use crate::entities::token::Claims;
use crate::errors::AppError;
use crate::repositories::experience::ExperienceRepository;

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub struct ExperienceHandler<E>
where
    E: ExperienceRepository,
{
    pub experience_repo: E,
}

impl<E> ExperienceHandler<E>
where
    E: ExperienceRepository,
{
    pub fn new(experience_repo: E) -> Self {
        ExperienceHandler { experience_repo }
    }

    /// The dashboard payload: the caller's entries newest-first plus the
    /// total count, total hours, and per-category breakdown.
    pub async fn overview(&self, user_id: &Uuid) -> Result<ExperienceOverview, AppError> {
        let entries = self.experience_repo.list_for_user(user_id, true).await?;
        let total_hours = self.experience_repo.total_hours_for_user(user_id).await?;
        let categories = self.experience_repo.category_counts_for_user(user_id).await?;

        let today = today();
        let experiences: Vec<ExperienceResponse> = entries
            .into_iter()
            .map(|e| ExperienceResponse::from_experience(e, &today))
            .collect();

        Ok(ExperienceOverview {
            total_count: experiences.len(),
            total_hours,
            categories,
            experiences,
        })
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: NewExperienceRequest,
    ) -> Result<NewExperienceResponse, AppError> {
        request.validate()?;

        let insert = request.prepare_for_insert(user_id);
        let id = self.experience_repo.create(&insert).await?;

        tracing::info!(experience_id = %id, "Experience created");
        Ok(NewExperienceResponse {
            id,
            message: "Experience created successfully".to_string(),
        })
    }

    pub async fn get(&self, id: &Uuid, claims: &Claims) -> Result<ExperienceResponse, AppError> {
        let experience = self.fetch_owned(id, claims).await?;
        Ok(ExperienceResponse::from_experience(experience, &today()))
    }

    pub async fn update(
        &self,
        id: &Uuid,
        claims: &Claims,
        request: UpdateExperienceRequest,
    ) -> Result<ExperienceResponse, AppError> {
        request.validate()?;

        self.fetch_owned(id, claims).await?;
        let updated = self.experience_repo.update(id, &request).await?;
        Ok(ExperienceResponse::from_experience(updated, &today()))
    }

    pub async fn delete(&self, id: &Uuid, claims: &Claims) -> Result<(), AppError> {
        self.fetch_owned(id, claims).await?;
        self.experience_repo.delete(id).await
    }

    /// Loads an entry, hiding other users' rows behind 404 so ids cannot
    /// be probed. Admins see everything.
    async fn fetch_owned(&self, id: &Uuid, claims: &Claims) -> Result<Experience, AppError> {
        let experience = self
            .experience_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;

        if experience.user_id.to_string() != claims.sub && !claims.admin {
            return Err(AppError::NotFound("Experience not found".to_string()));
        }

        Ok(experience)
    }
}
