use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    /// `None` for accounts created through an OAuth provider.
    pub password_hash: Option<String>,
    pub oauth_provider: Option<String>,
    pub oauth_id: Option<String>,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub email: String,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub oauth_provider: Option<String>,
    pub oauth_id: Option<String>,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub username: Option<String>,

    #[validate(
        length(min = 8, message = "Must be at least 8 characters"),
        custom(
            function = "validate_password_strength",
            message = "Must include uppercase, number, and symbol"
        )
    )]
    pub password: String,
}

impl NewUser {
    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        UserInsert {
            email: self.email.clone(),
            username: self.username.clone(),
            password_hash: Some(password_hash),
            oauth_provider: None,
            oauth_id: None,
            is_admin: false,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Identity returned by an OAuth provider after a successful code exchange.
#[derive(Debug, Clone)]
pub struct OAuthUserInfo {
    pub provider: String,
    pub provider_user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl OAuthUserInfo {
    /// Kakao accounts may withhold the email scope; a placeholder keeps the
    /// email column non-null and unique.
    pub fn email_or_placeholder(&self) -> String {
        self.email.clone().unwrap_or_else(|| {
            format!("{}-{}@oauth.invalid", self.provider, self.provider_user_id)
        })
    }

    pub fn prepare_for_insert(&self) -> UserInsert {
        UserInsert {
            email: self.email_or_placeholder(),
            username: self.name.clone(),
            password_hash: None,
            oauth_provider: Some(self.provider.clone()),
            oauth_id: Some(self.provider_user_id.clone()),
            is_admin: false,
            is_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewUserResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub oauth_provider: Option<String>,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            username: user.username,
            oauth_provider: user.oauth_provider,
            is_admin: user.is_admin,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_placeholder_email_is_stable() {
        let info = OAuthUserInfo {
            provider: "kakao".into(),
            provider_user_id: "12345".into(),
            email: None,
            name: None,
        };
        assert_eq!(info.email_or_placeholder(), "kakao-12345@oauth.invalid");
    }

    #[test]
    fn oauth_insert_has_no_password() {
        let info = OAuthUserInfo {
            provider: "google".into(),
            provider_user_id: "abc".into(),
            email: Some("user@gmail.com".into()),
            name: Some("User".into()),
        };
        let insert = info.prepare_for_insert();
        assert!(insert.password_hash.is_none());
        assert_eq!(insert.oauth_provider.as_deref(), Some("google"));
        assert_eq!(insert.email, "user@gmail.com");
        assert!(insert.is_verified);
    }
}
