use uuid::Uuid;
use validator::Validate;

use crate::entities::profile::{Profile, UpdateProfileRequest};
use crate::errors::AppError;
use crate::repositories::profile::ProfileRepository;

pub struct ProfileHandler<P>
where
    P: ProfileRepository,
{
    pub profile_repo: P,
}

impl<P> ProfileHandler<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: P) -> Self {
        ProfileHandler { profile_repo }
    }

    /// Accounts created before the profile table existed may have no row;
    /// fall back to the empty profile rather than 404.
    pub async fn get(&self, user_id: &Uuid) -> Result<Profile, AppError> {
        let profile = self.profile_repo.get_profile(user_id).await?;
        Ok(profile.unwrap_or_else(|| Profile::empty(*user_id)))
    }

    pub async fn update(
        &self,
        user_id: &Uuid,
        request: UpdateProfileRequest,
    ) -> Result<Profile, AppError> {
        request.validate()?;

        self.profile_repo.create_empty(user_id).await?;
        self.profile_repo.update_profile(user_id, &request).await
    }
}
