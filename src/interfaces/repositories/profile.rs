use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::profile::{Profile, UpdateProfileRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Seeds the empty one-to-one row at registration; idempotent.
    async fn create_empty(&self, user_id: &Uuid) -> Result<(), AppError>;
    async fn get_profile(&self, user_id: &Uuid) -> Result<Option<Profile>, AppError>;
    async fn update_profile(&self, user_id: &Uuid, update: &UpdateProfileRequest) -> Result<Profile, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn create_empty(&self, user_id: &Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, name, major, goal, strengths, ai_instructions, updated_at)
            VALUES ($1, '', '', '', '', '', NOW())
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(AppError::from)
    }

    async fn get_profile(&self, user_id: &Uuid) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_profile(&self, user_id: &Uuid, update: &UpdateProfileRequest) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                name = $2,
                major = $3,
                goal = $4,
                strengths = $5,
                ai_instructions = $6,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.major)
        .bind(&update.goal)
        .bind(&update.strengths)
        .bind(&update.ai_instructions)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }
}
