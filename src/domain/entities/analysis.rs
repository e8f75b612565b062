use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sanitized HTML produced from the model's markdown reply.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub html: String,
    pub model: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CompanyAnalyzeRequest {
    #[validate(length(min = 1, max = 100, message = "Company is required"))]
    pub company: String,

    #[validate(length(min = 1, max = 100, message = "Role is required"))]
    pub role: String,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ResumeRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Company is too long"))]
    pub company: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Role is too long"))]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CoverLetterRequest {
    #[validate(length(min = 1, max = 100, message = "Company is required"))]
    pub company: String,

    #[validate(length(min = 1, max = 100, message = "Role is required"))]
    pub role: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Extra request is too long"))]
    pub extra_request: Option<String>,
}
