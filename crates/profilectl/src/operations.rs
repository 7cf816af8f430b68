//! One function per profile operation. Each prints its own success output
//! and hands failures back to the caller untouched.

use crate::output;
use bedrock_profiles::{
    CreateProfileRequest, CreatedProfile, DeletedProfile, InferenceProfileService, ListScope,
    ProfileSummary, UpdateProfileRequest, UpdatedProfile,
};
use log::{info, warn};
use profile_core::{record_created_id, ProfileEntry, ProfileError};
use std::io::Write;
use std::path::Path;

fn emit(out: &mut dyn Write, text: &str) -> Result<(), ProfileError> {
    writeln!(out, "{}", text).map_err(|source| ProfileError::Io {
        path: "<output>".to_string(),
        source,
    })
}

/// Creates the profile and, when Bedrock returns an ARN, records it in the
/// manifest. A failed write-back is reported but does not fail the create.
pub async fn create_profile(
    service: &dyn InferenceProfileService,
    entry: &ProfileEntry,
    manifest_path: &Path,
    out: &mut dyn Write,
) -> Result<CreatedProfile, ProfileError> {
    let request = CreateProfileRequest::from_entry(entry)?;
    let created = service.create_profile(request).await?;
    emit(out, &output::render_created(&created))?;

    if let Some(arn) = &created.inference_profile_arn {
        match record_created_id(manifest_path, &entry.name, arn) {
            Ok(()) => {
                info!("Recorded {} for profile {}", arn, entry.name);
                emit(
                    out,
                    &format!("\nUpdated YAML file with ARN for profile: {}", entry.name),
                )?;
            }
            Err(e) => {
                warn!("Write-back for profile {} failed: {}", entry.name, e);
                emit(out, &format!("Error updating YAML file: {}", e))?;
            }
        }
    }

    Ok(created)
}

pub async fn update_profile(
    service: &dyn InferenceProfileService,
    entry: &ProfileEntry,
    out: &mut dyn Write,
) -> Result<UpdatedProfile, ProfileError> {
    let updated = service
        .update_profile(UpdateProfileRequest::from_entry(entry))
        .await?;
    emit(out, &output::render_updated(&updated))?;
    Ok(updated)
}

pub async fn delete_profile(
    service: &dyn InferenceProfileService,
    name: &str,
    out: &mut dyn Write,
) -> Result<DeletedProfile, ProfileError> {
    let deleted = service.delete_profile(name).await?;
    emit(out, &output::render_deleted(&deleted))?;
    Ok(deleted)
}

pub async fn list_profiles(
    service: &dyn InferenceProfileService,
    scope: ListScope,
    out: &mut dyn Write,
) -> Result<Vec<ProfileSummary>, ProfileError> {
    let profiles = service.list_profiles(scope).await?;
    emit(out, &output::render_list(&profiles))?;
    Ok(profiles)
}
