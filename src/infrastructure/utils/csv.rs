//! CSV backup codec for experience rows.
//!
//! Export writes UTF-8 with a BOM so spreadsheet tools open it correctly;
//! import tolerates the BOM and ignores the `id`/`created_at` columns.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::experience::{Experience, ExperienceInsert};
use crate::errors::AppError;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Serialize, Deserialize)]
struct CsvExperienceRecord {
    #[serde(default)]
    id: Option<String>,
    category: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    skills: Option<String>,
    #[serde(default)]
    hours: Option<i32>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<&Experience> for CsvExperienceRecord {
    fn from(exp: &Experience) -> Self {
        CsvExperienceRecord {
            id: Some(exp.id.to_string()),
            category: exp.category.clone(),
            title: exp.title.clone(),
            description: exp.description.clone(),
            start_date: exp.start_date.clone(),
            end_date: exp.end_date.clone(),
            skills: exp.skills.clone(),
            hours: Some(exp.hours),
            link: exp.link.clone(),
            created_at: Some(exp.created_at.to_rfc3339()),
        }
    }
}

pub fn encode_experiences(experiences: &[Experience]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for experience in experiences {
        writer.serialize(CsvExperienceRecord::from(experience))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV flush failed: {e}")))?;

    let mut output = Vec::with_capacity(UTF8_BOM.len() + body.len());
    output.extend_from_slice(UTF8_BOM);
    output.extend_from_slice(&body);
    Ok(output)
}

/// Parses uploaded CSV bytes into insertable rows for `user_id`. Rows with
/// an empty category or title are rejected rather than silently skipped.
pub fn decode_experiences(bytes: &[u8], user_id: Uuid) -> Result<Vec<ExperienceInsert>, AppError> {
    let data = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::Reader::from_reader(data);
    let mut entries = Vec::new();

    for (index, record) in reader.deserialize::<CsvExperienceRecord>().enumerate() {
        let record = record.map_err(|e| {
            AppError::InvalidInput(format!("CSV row {}: {}", index + 2, e))
        })?;

        if record.category.trim().is_empty() || record.title.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "CSV row {}: category and title are required",
                index + 2
            )));
        }

        entries.push(ExperienceInsert {
            user_id,
            category: record.category.trim().to_string(),
            title: record.title.trim().to_string(),
            description: record.description,
            start_date: record.start_date,
            end_date: record.end_date,
            skills: record.skills,
            hours: record.hours.unwrap_or(0).max(0),
            link: record.link,
            created_at: Utc::now(),
        });
    }

    Ok(entries)
}
