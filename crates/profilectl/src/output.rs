//! Human-readable rendering of service responses.

use bedrock_profiles::{CreatedProfile, DeletedProfile, ProfileSummary, UpdatedProfile};
use chrono::{DateTime, Utc};

pub const SEPARATOR: &str = "--------------------------------------------------";

fn timestamp(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_created(created: &CreatedProfile) -> String {
    let body = serde_json::to_string_pretty(created)
        .unwrap_or_else(|e| format!("<unrenderable response: {}>", e));
    format!(
        "\nCreate Inference Profile Response:\nFull API Response: {}",
        body
    )
}

pub fn render_updated(updated: &UpdatedProfile) -> String {
    format!(
        "\nUpdate Inference Profile Response:\nProfile Name: {}\nStatus: {}\nLast Modified: {}\n{}",
        updated.name,
        updated.status,
        timestamp(updated.last_modified.as_ref()),
        SEPARATOR
    )
}

pub fn render_deleted(deleted: &DeletedProfile) -> String {
    format!(
        "\nDelete Inference Profile Response:\nProfile Name: {}\nStatus: {}\nDeletion Time: {}\n{}",
        deleted.name,
        deleted.status,
        deleted.deletion_time.to_rfc3339(),
        SEPARATOR
    )
}

pub fn render_list(profiles: &[ProfileSummary]) -> String {
    let mut rendered = String::from("\nList of Inference Profiles:");
    for profile in profiles {
        rendered.push_str(&format!(
            "\n\nProfile Name: {}\nProfile ARN: {}\nDescription: {}\nStatus: {}\nCreated: {}\nLast Modified: {}\n{}",
            profile.name,
            profile.arn,
            profile.description.as_deref().unwrap_or("-"),
            profile.status,
            timestamp(profile.created_at.as_ref()),
            timestamp(profile.updated_at.as_ref()),
            SEPARATOR
        ));
    }
    rendered
}
