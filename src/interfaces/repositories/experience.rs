use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::experience::{CategoryCount, Experience, ExperienceInsert, UpdateExperienceRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn create(&self, entry: &ExperienceInsert) -> Result<Uuid, AppError>;
    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Experience>, AppError>;
    async fn update(&self, id: &Uuid, entry: &UpdateExperienceRequest) -> Result<Experience, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
    /// Owner-scoped list; `recent_first` orders by start date descending
    /// as the dashboard shows it.
    async fn list_for_user(&self, user_id: &Uuid, recent_first: bool) -> Result<Vec<Experience>, AppError>;
    async fn category_counts_for_user(&self, user_id: &Uuid) -> Result<Vec<CategoryCount>, AppError>;
    async fn total_hours_for_user(&self, user_id: &Uuid) -> Result<i64, AppError>;
    async fn insert_many(&self, entries: &[ExperienceInsert]) -> Result<u64, AppError>;
    async fn count_all(&self) -> Result<i64, AppError>;
    async fn total_hours_all(&self) -> Result<i64, AppError>;
    async fn category_counts_all(&self) -> Result<Vec<CategoryCount>, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn create(&self, entry: &ExperienceInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO experience (
                id, user_id, category, title, description,
                start_date, end_date, skills, hours, link, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.category)
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.start_date)
        .bind(&entry.end_date)
        .bind(&entry.skills)
        .bind(entry.hours)
        .bind(&entry.link)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(id)
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Experience>, AppError> {
        sqlx::query_as::<_, Experience>("SELECT * FROM experience WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, id: &Uuid, entry: &UpdateExperienceRequest) -> Result<Experience, AppError> {
        sqlx::query_as::<_, Experience>(
            r#"
            UPDATE experience SET
                category = $2,
                title = $3,
                description = $4,
                start_date = $5,
                end_date = $6,
                skills = $7,
                hours = $8,
                link = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&entry.category)
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.start_date)
        .bind(&entry.end_date)
        .bind(&entry.skills)
        .bind(entry.hours.max(0))
        .bind(&entry.link)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM experience WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Experience not found".to_string()));
        }

        Ok(())
    }

    async fn list_for_user(&self, user_id: &Uuid, recent_first: bool) -> Result<Vec<Experience>, AppError> {
        let sql = if recent_first {
            "SELECT * FROM experience WHERE user_id = $1 ORDER BY start_date DESC NULLS LAST"
        } else {
            "SELECT * FROM experience WHERE user_id = $1 ORDER BY start_date NULLS LAST"
        };

        sqlx::query_as::<_, Experience>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn category_counts_for_user(&self, user_id: &Uuid) -> Result<Vec<CategoryCount>, AppError> {
        sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM experience
            WHERE user_id = $1
            GROUP BY category
            ORDER BY count DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn total_hours_for_user(&self, user_id: &Uuid) -> Result<i64, AppError> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(hours)::BIGINT FROM experience WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(total.unwrap_or(0))
    }

    async fn insert_many(&self, entries: &[ExperienceInsert]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO experience (
                    id, user_id, category, title, description,
                    start_date, end_date, skills, hours, link, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(entry.user_id)
            .bind(&entry.category)
            .bind(&entry.title)
            .bind(&entry.description)
            .bind(&entry.start_date)
            .bind(&entry.end_date)
            .bind(&entry.skills)
            .bind(entry.hours)
            .bind(&entry.link)
            .bind(entry.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;
        }

        tx.commit().await.map_err(AppError::from)?;

        Ok(entries.len() as u64)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM experience")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn total_hours_all(&self) -> Result<i64, AppError> {
        let total: Option<i64> = sqlx::query_scalar("SELECT SUM(hours)::BIGINT FROM experience")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(total.unwrap_or(0))
    }

    async fn category_counts_all(&self) -> Result<Vec<CategoryCount>, AppError> {
        sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM experience
            GROUP BY category
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
