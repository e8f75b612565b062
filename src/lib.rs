mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, llm, utils};

use auth::jwt::JwtService;
use auth::oauth::OAuthClient;
use llm::groq::GroqClient;
use llm::search::WebSearchClient;
use repositories::sqlx_repo::{SqlxExperienceRepo, SqlxProfileRepo, SqlxUserRepo};
use use_cases::analysis::AnalysisHandler;
use use_cases::auth::AuthHandler;
use use_cases::backup::BackupHandler;
use use_cases::experience::ExperienceHandler;
use use_cases::profile::ProfileHandler;

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, SqlxProfileRepo, JwtService>;
pub type AppExperienceHandler = ExperienceHandler<SqlxExperienceRepo>;
pub type AppProfileHandler = ProfileHandler<SqlxProfileRepo>;
pub type AppAnalysisHandler = AnalysisHandler<SqlxExperienceRepo, SqlxProfileRepo, GroqClient>;
pub type AppBackupHandler = BackupHandler<SqlxExperienceRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub experience_handler: AppExperienceHandler,
    pub profile_handler: AppProfileHandler,
    pub analysis_handler: AppAnalysisHandler,
    pub backup_handler: AppBackupHandler,
    pub oauth_client: OAuthClient,
    pub config: settings::AppConfig,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let user_repo = SqlxUserRepo::new(pool.clone());
        let profile_repo = SqlxProfileRepo::new(pool.clone());
        let experience_repo = SqlxExperienceRepo::new(pool);

        let chat_client = GroqClient::new(
            config.groq_api_url.clone(),
            config.groq_api_key.clone(),
            config.groq_model.clone(),
        );
        let search_client =
            WebSearchClient::from_config(&config.search_api_url, config.search_api_key.as_deref());

        let auth_handler = AuthHandler::new(user_repo, profile_repo.clone(), jwt_service);
        let experience_handler = ExperienceHandler::new(experience_repo.clone());
        let profile_handler = ProfileHandler::new(profile_repo.clone());
        let analysis_handler =
            AnalysisHandler::new(experience_repo.clone(), profile_repo, chat_client, search_client);
        let backup_handler = BackupHandler::new(experience_repo);

        AppState {
            auth_handler,
            experience_handler,
            profile_handler,
            analysis_handler,
            backup_handler,
            oauth_client: OAuthClient::new(),
            config: config.clone(),
        }
    }
}
