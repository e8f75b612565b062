#![allow(dead_code)]

use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use careerlog_backend::entities::experience::{
    CategoryCount, Experience, ExperienceInsert, UpdateExperienceRequest,
};
use careerlog_backend::entities::profile::{Profile, UpdateProfileRequest};
use careerlog_backend::entities::token::Claims;
use careerlog_backend::entities::user::{User, UserInsert};
use careerlog_backend::errors::AppError;
use careerlog_backend::settings::{AppConfig, AppEnvironment};

mock! {
    pub UserRepo {}

    #[async_trait::async_trait]
    impl careerlog_backend::repositories::user::UserRepository for UserRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn count_users(&self) -> Result<u64, AppError>;
        async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
        async fn get_user_by_oauth(&self, provider: &str, oauth_id: &str) -> Result<Option<User>, AppError>;
        async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
        async fn list_users(&self) -> Result<Vec<User>, AppError>;
        async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
        async fn delete_user(&self, id: &Uuid, deleted_by: &Uuid) -> Result<(), AppError>;
        async fn purge_soft_deleted_users(&self) -> Result<u64, AppError>;
    }
}

mock! {
    pub ProfileRepo {}

    #[async_trait::async_trait]
    impl careerlog_backend::repositories::profile::ProfileRepository for ProfileRepo {
        async fn create_empty(&self, user_id: &Uuid) -> Result<(), AppError>;
        async fn get_profile(&self, user_id: &Uuid) -> Result<Option<Profile>, AppError>;
        async fn update_profile(&self, user_id: &Uuid, update: &UpdateProfileRequest) -> Result<Profile, AppError>;
    }
}

mock! {
    pub ExperienceRepo {}

    #[async_trait::async_trait]
    impl careerlog_backend::repositories::experience::ExperienceRepository for ExperienceRepo {
        async fn create(&self, entry: &ExperienceInsert) -> Result<Uuid, AppError>;
        async fn get_by_id(&self, id: &Uuid) -> Result<Option<Experience>, AppError>;
        async fn update(&self, id: &Uuid, entry: &UpdateExperienceRequest) -> Result<Experience, AppError>;
        async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
        async fn list_for_user(&self, user_id: &Uuid, recent_first: bool) -> Result<Vec<Experience>, AppError>;
        async fn category_counts_for_user(&self, user_id: &Uuid) -> Result<Vec<CategoryCount>, AppError>;
        async fn total_hours_for_user(&self, user_id: &Uuid) -> Result<i64, AppError>;
        async fn insert_many(&self, entries: &[ExperienceInsert]) -> Result<u64, AppError>;
        async fn count_all(&self) -> Result<i64, AppError>;
        async fn total_hours_all(&self) -> Result<i64, AppError>;
        async fn category_counts_all(&self) -> Result<Vec<CategoryCount>, AppError>;
    }
}

mock! {
    pub Chat {}

    #[async_trait::async_trait]
    impl careerlog_backend::llm::groq::ChatClient for Chat {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError>;
        fn model(&self) -> &str;
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: "postgres://localhost/test".into(),
        cors_allowed_origins: vec!["*".into()],
        jwt_secret: "jwt_secret_long_enough_for_hs512_test_1234567890".into(),
        jwt_expiration_minutes: 15,
        refresh_token_secret: "refresh_secret_long_enough_for_hs512_test_12345".into(),
        refresh_token_exp_days: 7,
        groq_api_key: None,
        groq_model: "llama-3.3-70b-versatile".into(),
        groq_api_url: "https://api.groq.com/openai/v1/chat/completions".into(),
        search_api_key: None,
        search_api_url: "https://api.tavily.com/search".into(),
        admin_email: None,
        admin_password: None,
        google_client_id: None,
        google_client_secret: None,
        google_redirect_uri: None,
        kakao_client_id: None,
        kakao_client_secret: None,
        kakao_redirect_uri: None,
        naver_client_id: None,
        naver_client_secret: None,
        naver_redirect_uri: None,
    }
}

pub fn test_user(id: Uuid, is_admin: bool) -> User {
    User {
        id,
        email: "user@example.com".into(),
        username: Some("user".into()),
        password_hash: Some("hash".into()),
        oauth_provider: None,
        oauth_id: None,
        is_admin,
        is_verified: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
        deleted_by: None,
    }
}

pub fn claims_for(user_id: Uuid, admin: bool) -> Claims {
    Claims {
        sub: user_id.to_string(),
        email: "user@example.com".into(),
        admin,
        verified: true,
        exp: usize::MAX,
        iat: 0,
    }
}

pub fn experience_for(user_id: Uuid) -> Experience {
    Experience {
        id: Uuid::new_v4(),
        user_id,
        category: "Project".into(),
        title: "Search engine".into(),
        description: Some("Built an inverted index".into()),
        start_date: Some("2024-01-01".into()),
        end_date: Some("2024-06-30".into()),
        skills: Some("Rust, SQL".into()),
        hours: 120,
        link: None,
        created_at: Utc::now(),
    }
}
