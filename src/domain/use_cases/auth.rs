use uuid::Uuid;
use validator::Validate;

use crate::entities::token::AuthResponse;
use crate::entities::user::{LoginUser, NewUser, NewUserResponse, OAuthUserInfo, User, UserInsert};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::profile::ProfileRepository;
use crate::interfaces::repositories::user::UserRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::repositories::token::TokenServiceRepository;

pub struct AuthHandler<R, P, T>
where
    R: UserRepository,
    P: ProfileRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub profile_repo: P,
    pub token_service: T,
}

impl<R, P, T> AuthHandler<R, P, T>
where
    R: UserRepository,
    P: ProfileRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, profile_repo: P, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            profile_repo,
            token_service,
        }
    }

    /// Registers a new user after validation and password hashing. The
    /// empty profile row is seeded in the same call so the settings page
    /// always has something to load.
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let user_id = self.user_repo.create_user(&user_insert).await?;
        self.profile_repo.create_empty(&user_id).await?;

        Ok(NewUserResponse {
            id: user_id,
            message: "User created successfully".to_string(),
        })
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        // OAuth-only accounts have no password hash to compare against.
        let password_hash = user.password_hash
            .as_deref()
            .ok_or(AuthError::PasswordLoginUnavailable)?;

        let is_password_valid = verify_password(&request.password, password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(response)
    }

    /// Completes an OAuth callback: match by (provider, id), fall back to
    /// the provider email, otherwise create a fresh account.
    pub async fn oauth_login(&self, info: OAuthUserInfo) -> Result<AuthResponse, AuthError> {
        let existing = self.user_repo
            .get_user_by_oauth(&info.provider, &info.provider_user_id)
            .await
            .map_err(|_| AuthError::AuthenticationFailed)?;

        let user = match existing {
            Some(user) => user,
            None => {
                let by_email = match &info.email {
                    Some(email) => self.user_repo
                        .get_user_by_email(email)
                        .await
                        .map_err(|_| AuthError::AuthenticationFailed)?,
                    None => None,
                };

                match by_email {
                    Some(user) => user,
                    None => self.create_oauth_user(&info).await?,
                }
            }
        };

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, provider = %info.provider, "OAuth login completed");
        Ok(response)
    }

    async fn create_oauth_user(&self, info: &OAuthUserInfo) -> Result<User, AuthError> {
        let insert = info.prepare_for_insert();
        let user_id = self.user_repo
            .create_user(&insert)
            .await
            .map_err(AuthError::from)?;

        self.profile_repo
            .create_empty(&user_id)
            .await
            .map_err(AuthError::from)?;

        self.user_repo
            .get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::AuthenticationFailed)?
            .ok_or(AuthError::AuthenticationFailed)
    }

    /// Create auth response
    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&user)
    }

    /// Soft-deletes `user_id`; permitted for the account owner or an admin.
    pub async fn delete_user(&self, user_id: Uuid, current_user: &User) -> Result<(), AppError> {
        if user_id != current_user.id && !current_user.is_admin {
            return Err(AppError::ForbiddenAccess);
        }

        self.user_repo.delete_user(&user_id, &current_user.id).await
    }

    /// Seeds the admin account from the environment at startup; a no-op
    /// when admin credentials are unset or the account already exists.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.get_user_by_email(email).await?.is_some() {
            return Ok(());
        }

        let now = chrono::Utc::now();
        let insert = UserInsert {
            email: email.to_string(),
            username: Some("admin".to_string()),
            password_hash: Some(hash_password(password)?),
            oauth_provider: None,
            oauth_id: None,
            is_admin: true,
            is_verified: true,
            created_at: now,
            updated_at: now,
        };

        let user_id = self.user_repo.create_user(&insert).await?;
        self.profile_repo.create_empty(&user_id).await?;

        tracing::info!("Admin account seeded");
        Ok(())
    }
}
