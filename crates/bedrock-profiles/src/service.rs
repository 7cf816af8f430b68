use crate::models::{
    CreateProfileRequest, CreatedProfile, DeletedProfile, ListScope, ProfileSummary,
    UpdateProfileRequest, UpdatedProfile,
};
use async_trait::async_trait;
use profile_core::ProfileError;

/// The inference-profile control plane, one call per method.
///
/// Implementations report provider failures as `ProfileError::Provider` and
/// leave logging and continuation decisions to the caller.
#[async_trait]
pub trait InferenceProfileService: Send + Sync {
    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<CreatedProfile, ProfileError>;

    async fn update_profile(
        &self,
        request: UpdateProfileRequest,
    ) -> Result<UpdatedProfile, ProfileError>;

    async fn delete_profile(&self, name: &str) -> Result<DeletedProfile, ProfileError>;

    async fn list_profiles(&self, scope: ListScope) -> Result<Vec<ProfileSummary>, ProfileError>;
}
