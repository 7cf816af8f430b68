use chrono::{DateTime, Utc};
use profile_core::{ProfileEntry, ProfileError, Tag};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProfileRequest {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    /// Model or system-defined profile ARN the new profile copies from
    pub model_source: String,
    pub client_request_token: String,
}

impl CreateProfileRequest {
    pub fn from_entry(entry: &ProfileEntry) -> Result<Self, ProfileError> {
        let model_source = entry
            .model_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProfileError::MissingField {
                profile: entry.name.clone(),
                field: "model_id",
            })?;

        Ok(Self {
            name: entry.name.clone(),
            description: non_empty(entry.description.as_deref()),
            tags: entry.tags.clone(),
            model_source,
            client_request_token: Uuid::new_v4().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub profile_type: Option<String>,
    pub description: Option<String>,
    pub model_id: Option<String>,
    pub tags: Vec<Tag>,
    /// ARN recorded by a previous create, if any
    pub known_arn: Option<String>,
}

impl UpdateProfileRequest {
    pub fn from_entry(entry: &ProfileEntry) -> Self {
        Self {
            name: entry.name.clone(),
            profile_type: non_empty(entry.profile_type.as_deref()),
            description: non_empty(entry.description.as_deref()),
            model_id: non_empty(entry.model_id.as_deref()),
            tags: entry.tags.clone(),
            known_arn: non_empty(entry.created_model_id.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    /// Application profiles plus the system-defined cross-region ones
    #[default]
    All,
    /// Only profiles created in this account
    Application,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProfile {
    /// Requested name; CreateInferenceProfile does not echo it back
    #[serde(skip)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_profile_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedProfile {
    pub name: String,
    pub status: String,
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedProfile {
    pub name: String,
    pub arn: String,
    pub status: String,
    pub deletion_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub arn: String,
    pub id: String,
    pub description: Option<String>,
    pub status: String,
    pub profile_type: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub models: Vec<String>,
}
