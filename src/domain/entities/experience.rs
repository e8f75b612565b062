use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A user-entered activity/achievement record. Dates are stored as ISO
/// `YYYY-MM-DD` strings; lexicographic order matches chronological order,
/// which is what the status computation relies on.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub skills: Option<String>,
    pub hours: i32,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceStatus {
    Ongoing,
    Completed,
}

impl ExperienceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceStatus::Ongoing => "ongoing",
            ExperienceStatus::Completed => "completed",
        }
    }
}

impl Experience {
    /// An entry is completed once its end date has passed; entries with no
    /// end date are always ongoing.
    pub fn status_on(&self, today: &str) -> ExperienceStatus {
        match &self.end_date {
            Some(end) if end.as_str() < today => ExperienceStatus::Completed,
            _ => ExperienceStatus::Ongoing,
        }
    }
}

#[derive(Debug)]
pub struct ExperienceInsert {
    pub user_id: Uuid,
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub skills: Option<String>,
    pub hours: i32,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("iso_date");
        error.message = Some("Must be YYYY-MM-DD".into());
        error
    })?;
    Ok(())
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewExperienceRequest {
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_iso_date"))]
    pub start_date: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_iso_date"))]
    pub end_date: Option<String>,

    #[serde(default)]
    pub skills: Option<String>,

    /// Also read as "importance" by the analysis prompts.
    #[serde(default)]
    pub hours: i32,

    #[serde(default)]
    pub link: Option<String>,
}

impl NewExperienceRequest {
    pub fn prepare_for_insert(&self, user_id: Uuid) -> ExperienceInsert {
        ExperienceInsert {
            user_id,
            category: self.category.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            skills: self.skills.clone(),
            hours: self.hours.max(0),
            link: self.link.clone(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateExperienceRequest {
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_iso_date"))]
    pub start_date: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_iso_date"))]
    pub end_date: Option<String>,

    #[serde(default)]
    pub skills: Option<String>,

    #[serde(default)]
    pub hours: i32,

    #[serde(default)]
    pub link: Option<String>,
}

/// Experience row enriched with the computed status label, as the original
/// dashboard rendered it.
#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    #[serde(flatten)]
    pub experience: Experience,
    pub status: ExperienceStatus,
}

impl ExperienceResponse {
    pub fn from_experience(experience: Experience, today: &str) -> Self {
        let status = experience.status_on(today);
        ExperienceResponse { experience, status }
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Owner-scoped list plus the dashboard aggregates.
#[derive(Debug, Serialize)]
pub struct ExperienceOverview {
    pub experiences: Vec<ExperienceResponse>,
    pub total_count: usize,
    pub total_hours: i64,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
pub struct NewExperienceResponse {
    pub id: Uuid,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(end_date: Option<&str>) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: "Project".into(),
            title: "Test".into(),
            description: None,
            start_date: Some("2024-01-01".into()),
            end_date: end_date.map(String::from),
            skills: None,
            hours: 10,
            link: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn past_end_date_is_completed() {
        assert_eq!(entry(Some("2024-06-30")).status_on("2025-01-01"), ExperienceStatus::Completed);
    }

    #[test]
    fn future_or_missing_end_date_is_ongoing() {
        assert_eq!(entry(Some("2030-01-01")).status_on("2025-01-01"), ExperienceStatus::Ongoing);
        assert_eq!(entry(None).status_on("2025-01-01"), ExperienceStatus::Ongoing);
    }

    #[test]
    fn end_date_today_counts_as_ongoing() {
        assert_eq!(entry(Some("2025-01-01")).status_on("2025-01-01"), ExperienceStatus::Ongoing);
    }

    #[test]
    fn invalid_dates_fail_validation() {
        let request = NewExperienceRequest {
            category: "Project".into(),
            title: "Test".into(),
            description: None,
            start_date: Some("01/02/2024".into()),
            end_date: None,
            skills: None,
            hours: 0,
            link: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_hours_clamp_to_zero() {
        let request = NewExperienceRequest {
            category: "Project".into(),
            title: "Test".into(),
            description: None,
            start_date: None,
            end_date: None,
            skills: None,
            hours: -5,
            link: None,
        };
        assert_eq!(request.prepare_for_insert(Uuid::new_v4()).hours, 0);
    }
}
