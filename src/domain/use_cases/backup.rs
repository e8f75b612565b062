use uuid::Uuid;

use crate::entities::token::Claims;
use crate::errors::AppError;
use crate::infrastructure::utils::csv::{decode_experiences, encode_experiences};
use crate::repositories::experience::ExperienceRepository;

#[derive(Debug, serde::Serialize)]
pub struct ImportResult {
    pub imported: u64,
    pub message: String,
}

pub struct BackupHandler<E>
where
    E: ExperienceRepository,
{
    pub experience_repo: E,
}

impl<E> BackupHandler<E>
where
    E: ExperienceRepository,
{
    pub fn new(experience_repo: E) -> Self {
        BackupHandler { experience_repo }
    }

    /// CSV export of the caller's entries. Admins may export any user's
    /// data by passing the target id.
    pub async fn export(
        &self,
        claims: &Claims,
        target_user: Option<Uuid>,
    ) -> Result<Vec<u8>, AppError> {
        let user_id = self.resolve_target(claims, target_user)?;
        let entries = self.experience_repo.list_for_user(&user_id, false).await?;
        encode_experiences(&entries)
    }

    /// Appends uploaded rows to the caller's data. Existing entries are
    /// kept; ids and timestamps in the file are ignored.
    pub async fn import(&self, claims: &Claims, bytes: &[u8]) -> Result<ImportResult, AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::InvalidInput("Invalid user id".to_string()))?;

        let entries = decode_experiences(bytes, user_id)?;
        if entries.is_empty() {
            return Err(AppError::InvalidInput("CSV contains no data rows".to_string()));
        }

        let imported = self.experience_repo.insert_many(&entries).await?;

        tracing::info!(user_id = %user_id, imported, "CSV import completed");
        Ok(ImportResult {
            imported,
            message: format!("{imported} experiences imported"),
        })
    }

    fn resolve_target(&self, claims: &Claims, target_user: Option<Uuid>) -> Result<Uuid, AppError> {
        let own_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::InvalidInput("Invalid user id".to_string()))?;

        match target_user {
            Some(other) if other != own_id => {
                if claims.admin {
                    Ok(other)
                } else {
                    Err(AppError::ForbiddenAccess)
                }
            }
            _ => Ok(own_id),
        }
    }
}
