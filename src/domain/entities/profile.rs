use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Per-user career metadata. Every field feeds the analysis prompts; all
/// are free text and default to empty at registration.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub name: String,
    pub major: String,
    pub goal: String,
    pub strengths: String,
    pub ai_instructions: String,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn empty(user_id: Uuid) -> Self {
        Profile {
            user_id,
            name: String::new(),
            major: String::new(),
            goal: String::new(),
            strengths: String::new(),
            ai_instructions: String::new(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Major is too long"))]
    pub major: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Goal is too long"))]
    pub goal: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Strengths are too long"))]
    pub strengths: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "AI instructions are too long"))]
    pub ai_instructions: String,
}
