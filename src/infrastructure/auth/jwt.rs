use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};
use uuid::Uuid;

use crate::entities::token::{Claims, RefreshClaims};
use crate::entities::user::User;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
    refresh_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
            refresh_expiration: Duration::days(config.refresh_token_exp_days),
        }
    }

    pub fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            admin: user.is_admin,
            verified: user.is_verified,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    pub fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.refresh_expiration).timestamp() as usize;

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.refresh_encoding).map_err(AuthError::from)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }

    pub fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<RefreshClaims>(token, &self.keys.refresh_decoding, &validation).map_err(AuthError::from)
    }
}

impl TokenServiceRepository for JwtService {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        self.create_jwt(user)
    }

    fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError> {
        self.create_refresh_jwt(user_id)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        self.decode_jwt(token)
    }

    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError> {
        self.decode_refresh_jwt(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;
    use chrono::Utc;

    fn test_config() -> AppConfig {
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

    fn test_user(is_admin: bool) -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            username: None,
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

    #[test]
    fn access_token_round_trips_claims() {
        let service = JwtService::new(&test_config());
        let user = test_user(true);

        let token = service.create_jwt(&user).unwrap();
        let decoded = service.decode_jwt(&token).unwrap();

        assert_eq!(decoded.claims.sub, user.id.to_string());
        assert_eq!(decoded.claims.email, user.email);
        assert!(decoded.claims.admin);
    }

    #[test]
    fn refresh_token_round_trips_subject() {
        let service = JwtService::new(&test_config());
        let user_id = Uuid::new_v4();

        let token = service.create_refresh_jwt(&user_id).unwrap();
        let decoded = service.decode_refresh_jwt(&token).unwrap();

        assert_eq!(decoded.claims.sub, user_id.to_string());
    }

    #[test]
    fn access_token_is_not_a_valid_refresh_token() {
        let service = JwtService::new(&test_config());
        let token = service.create_jwt(&test_user(false)).unwrap();

        // Signed with a different secret, so it must not decode.
        assert!(service.decode_refresh_jwt(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut config = test_config();
        config.jwt_expiration_minutes = -5;
        let service = JwtService::new(&config);

        let token = service.create_jwt(&test_user(false)).unwrap();
        assert!(matches!(service.decode_jwt(&token), Err(AuthError::TokenExpired)));
    }
}
