use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Settings for one OAuth provider. A provider is disabled when its
/// client id/secret are missing from the environment.
#[derive(Debug, Clone)]
pub struct OAuthProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_minutes: i64,

    #[serde(default)]
    pub refresh_token_secret: String,

    #[serde(default = "default_refresh_expiration")]
    pub refresh_token_exp_days: i64,

    #[serde(default)]
    pub groq_api_key: Option<String>,

    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    #[serde(default = "default_groq_api_url")]
    pub groq_api_url: String,

    #[serde(default)]
    pub search_api_key: Option<String>,

    #[serde(default = "default_search_api_url")]
    pub search_api_url: String,

    #[serde(default)]
    pub admin_email: Option<String>,

    #[serde(default)]
    pub admin_password: Option<String>,

    #[serde(default)]
    pub google_client_id: Option<String>,
    #[serde(default)]
    pub google_client_secret: Option<String>,
    #[serde(default)]
    pub google_redirect_uri: Option<String>,

    #[serde(default)]
    pub kakao_client_id: Option<String>,
    #[serde(default)]
    pub kakao_client_secret: Option<String>,
    #[serde(default)]
    pub kakao_redirect_uri: Option<String>,

    #[serde(default)]
    pub naver_client_id: Option<String>,
    #[serde(default)]
    pub naver_client_secret: Option<String>,
    #[serde(default)]
    pub naver_redirect_uri: Option<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Careerlog-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_expiration() -> i64 {
    15
}
fn default_refresh_expiration() -> i64 {
    7
}
fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_groq_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}
fn default_search_api_url() -> String {
    "https://api.tavily.com/search".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.database_url = fill_or_env(config.database_url, "APP_DATABASE_URL")?;
        config.jwt_secret = fill_or_env(config.jwt_secret, "APP_JWT_SECRET")?;
        config.refresh_token_secret = fill_or_env(config.refresh_token_secret, "APP_REFRESH_TOKEN_SECRET")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.jwt_secret.len() < 32 {
            errors.push("JWT_SECRET must be at least 32 characters");
        }
        if self.refresh_token_secret.len() < 32 {
            errors.push("REFRESH_TOKEN_SECRET must be at least 32 characters");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }
        if self.admin_email.is_some() != self.admin_password.is_some() {
            errors.push("ADMIN_EMAIL and ADMIN_PASSWORD must be set together");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Resolved settings for `google`, `kakao` or `naver`, or `None` when
    /// the provider is not configured.
    pub fn oauth_provider(&self, provider: &str) -> Option<OAuthProviderSettings> {
        let (id, secret, redirect) = match provider {
            "google" => (&self.google_client_id, &self.google_client_secret, &self.google_redirect_uri),
            "kakao" => (&self.kakao_client_id, &self.kakao_client_secret, &self.kakao_redirect_uri),
            "naver" => (&self.naver_client_id, &self.naver_client_secret, &self.naver_redirect_uri),
            _ => return None,
        };

        Some(OAuthProviderSettings {
            client_id: id.clone()?,
            client_secret: secret.clone()?,
            redirect_uri: redirect.clone()?,
        })
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &self.jwt_secret.redact())
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("refresh_token_secret", &self.refresh_token_secret.redact())
            .field("refresh_token_exp_days", &self.refresh_token_exp_days)
            .field("groq_api_key", &self.groq_api_key.as_deref().unwrap_or("").redact())
            .field("groq_model", &self.groq_model)
            .field("search_api_key", &self.search_api_key.as_deref().unwrap_or("").redact())
            .field("oauth_google", &self.google_client_id.is_some())
            .field("oauth_kakao", &self.kakao_client_id.is_some())
            .field("oauth_naver", &self.naver_client_id.is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub refresh_encoding: EncodingKey,
    pub refresh_decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let jwt_secret = Zeroizing::new(config.jwt_secret.clone());
        let refresh_secret = Zeroizing::new(config.refresh_token_secret.clone());

        JwtKeys {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .field("refresh_encoding", &"[REDACTED]")
            .field("refresh_decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "a".repeat(48),
            jwt_expiration_minutes: 15,
            refresh_token_secret: "b".repeat(48),
            refresh_token_exp_days: 7,
            groq_api_key: None,
            groq_model: default_groq_model(),
            groq_api_url: default_groq_api_url(),
            search_api_key: None,
            search_api_url: default_search_api_url(),
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

    #[test]
    fn valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let mut config = base_config();
        config.jwt_secret = "short".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = base_config();
        config.env = AppEnvironment::Production;
        assert!(config.validate().is_err());
    }

    #[test]
    fn admin_credentials_must_come_in_pairs() {
        let mut config = base_config();
        config.admin_email = Some("admin@example.com".into());
        assert!(config.validate().is_err());

        config.admin_password = Some("AdminPass123!".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oauth_provider_requires_all_three_values() {
        let mut config = base_config();
        assert!(config.oauth_provider("google").is_none());

        config.google_client_id = Some("id".into());
        config.google_client_secret = Some("secret".into());
        assert!(config.oauth_provider("google").is_none());

        config.google_redirect_uri = Some("http://localhost/cb".into());
        assert!(config.oauth_provider("google").is_some());
        assert!(config.oauth_provider("github").is_none());
    }

    #[test]
    fn cors_origins_splits_comma_separated_values() {
        let mut config = base_config();
        config.cors_allowed_origins = vec!["http://a.com, http://b.com".into()];
        assert_eq!(config.cors_origins(), vec!["http://a.com", "http://b.com"]);
    }
}
