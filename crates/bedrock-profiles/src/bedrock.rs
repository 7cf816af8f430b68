use crate::models::{
    CreateProfileRequest, CreatedProfile, DeletedProfile, ListScope, ProfileSummary,
    UpdateProfileRequest, UpdatedProfile,
};
use crate::service::InferenceProfileService;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrock::{
    error::DisplayErrorContext,
    operation::get_inference_profile::GetInferenceProfileOutput,
    primitives::DateTime as SmithyDateTime,
    types::{InferenceProfileModelSource, InferenceProfileSummary, InferenceProfileType, Tag},
    Client,
};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use profile_core::{AwsConfig, ProfileError};

pub struct BedrockProfileClient {
    client: Client,
}

impl BedrockProfileClient {
    pub async fn new(config: &AwsConfig) -> Result<Self, ProfileError> {
        info!(
            "Initializing BedrockProfileClient for region {}",
            config.region
        );
        if config.region.trim().is_empty() {
            return Err(ProfileError::Config("AWS region must not be empty".to_string()));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let aws_config = loader.load().await;

        Ok(Self {
            client: Client::new(&aws_config),
        })
    }

    async fn get_profile(&self, identifier: &str) -> Result<ProfileSummary, ProfileError> {
        let output = self
            .client
            .get_inference_profile()
            .inference_profile_identifier(identifier)
            .send()
            .await
            .map_err(|e| provider_error("GetInferenceProfile", e))?;
        Ok(summary_from_get(&output))
    }

    async fn find_by_name(&self, name: &str) -> Result<ProfileSummary, ProfileError> {
        self.list_profiles(ListScope::All)
            .await?
            .into_iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))
    }

    fn warn_on_drift(request: &UpdateProfileRequest, current: &ProfileSummary) {
        if let Some(description) = &request.description {
            if current.description.as_deref() != Some(description.as_str()) {
                warn!(
                    "Profile '{}': description differs from Bedrock and cannot be changed in place",
                    request.name
                );
            }
        }
        if let Some(profile_type) = &request.profile_type {
            if !profile_type.eq_ignore_ascii_case(&current.profile_type) {
                warn!(
                    "Profile '{}': manifest type {} does not match Bedrock type {}",
                    request.name, profile_type, current.profile_type
                );
            }
        }
    }
}

#[async_trait]
impl InferenceProfileService for BedrockProfileClient {
    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<CreatedProfile, ProfileError> {
        let tags = to_sdk_tags(&request.tags)?;

        info!(
            "Creating inference profile {} from {}",
            request.name, request.model_source
        );
        let output = self
            .client
            .create_inference_profile()
            .inference_profile_name(&request.name)
            .set_description(request.description.clone())
            .client_request_token(&request.client_request_token)
            .set_tags(if tags.is_empty() { None } else { Some(tags) })
            .model_source(InferenceProfileModelSource::CopyFrom(
                request.model_source.clone(),
            ))
            .send()
            .await
            .map_err(|e| provider_error("CreateInferenceProfile", e))?;

        let arn = output.inference_profile_arn();
        Ok(CreatedProfile {
            name: request.name,
            inference_profile_arn: (!arn.is_empty()).then(|| arn.to_string()),
            status: output.status().map(|s| s.as_str().to_string()),
        })
    }

    async fn update_profile(
        &self,
        request: UpdateProfileRequest,
    ) -> Result<UpdatedProfile, ProfileError> {
        let current = match &request.known_arn {
            Some(arn) => self.get_profile(arn).await?,
            None => self.find_by_name(&request.name).await?,
        };
        Self::warn_on_drift(&request, &current);

        if !request.tags.is_empty() {
            debug!(
                "Tagging {} with {} tags",
                current.arn,
                request.tags.len()
            );
            self.client
                .tag_resource()
                .resource_arn(&current.arn)
                .set_tags(Some(to_sdk_tags(&request.tags)?))
                .send()
                .await
                .map_err(|e| provider_error("TagResource", e))?;
        }

        let refreshed = self.get_profile(&current.arn).await?;
        Ok(UpdatedProfile {
            name: refreshed.name,
            status: refreshed.status,
            last_modified: refreshed.updated_at,
        })
    }

    async fn delete_profile(&self, name: &str) -> Result<DeletedProfile, ProfileError> {
        let target = self.find_by_name(name).await?;

        info!("Deleting inference profile {} ({})", name, target.arn);
        self.client
            .delete_inference_profile()
            .inference_profile_identifier(&target.arn)
            .send()
            .await
            .map_err(|e| provider_error("DeleteInferenceProfile", e))?;

        Ok(DeletedProfile {
            name: target.name,
            arn: target.arn,
            status: "DELETED".to_string(),
            deletion_time: Utc::now(),
        })
    }

    async fn list_profiles(&self, scope: ListScope) -> Result<Vec<ProfileSummary>, ProfileError> {
        let type_filter = match scope {
            ListScope::Application => Some(InferenceProfileType::Application),
            ListScope::All => None,
        };

        let mut profiles = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .client
                .list_inference_profiles()
                .set_type_equals(type_filter.clone())
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| provider_error("ListInferenceProfiles", e))?;

            profiles.extend(output.inference_profile_summaries().iter().map(summary_from_list));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!("Listed {} inference profiles", profiles.len());
        Ok(profiles)
    }
}

fn provider_error<E>(operation: &str, err: E) -> ProfileError
where
    E: std::error::Error + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    error!("Bedrock {} error: {}", operation, message);
    ProfileError::provider(operation, message)
}

fn to_sdk_tags(tags: &[profile_core::Tag]) -> Result<Vec<Tag>, ProfileError> {
    tags.iter()
        .map(|tag| {
            Tag::builder()
                .key(&tag.key)
                .value(&tag.value)
                .build()
                .map_err(|e| ProfileError::Config(format!("invalid tag '{}': {}", tag.key, e)))
        })
        .collect()
}

fn to_utc(timestamp: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

fn summary_from_list(summary: &InferenceProfileSummary) -> ProfileSummary {
    ProfileSummary {
        name: summary.inference_profile_name().to_string(),
        arn: summary.inference_profile_arn().to_string(),
        id: summary.inference_profile_id().to_string(),
        description: summary.description().map(str::to_string),
        status: summary.status().as_str().to_string(),
        profile_type: summary.r#type().as_str().to_string(),
        created_at: summary.created_at().and_then(to_utc),
        updated_at: summary.updated_at().and_then(to_utc),
        models: summary
            .models()
            .iter()
            .filter_map(|m| m.model_arn().map(str::to_string))
            .collect(),
    }
}

fn summary_from_get(output: &GetInferenceProfileOutput) -> ProfileSummary {
    ProfileSummary {
        name: output.inference_profile_name().to_string(),
        arn: output.inference_profile_arn().to_string(),
        id: output.inference_profile_id().to_string(),
        description: output.description().map(str::to_string),
        status: output.status().as_str().to_string(),
        profile_type: output.r#type().as_str().to_string(),
        created_at: output.created_at().and_then(to_utc),
        updated_at: output.updated_at().and_then(to_utc),
        models: output
            .models()
            .iter()
            .filter_map(|m| m.model_arn().map(str::to_string))
            .collect(),
    }
}
