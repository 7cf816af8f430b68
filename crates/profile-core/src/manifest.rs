//! The `profiles.yaml` manifest: the desired inference profiles and the
//! identifiers Bedrock assigned to them.

use crate::errors::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_MANIFEST_PATH: &str = "profiles.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_model_id: Option<String>,
    /// Keys this tool does not interpret; kept so write-back does not drop them
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ProfileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_id: None,
            description: None,
            tags: Vec::new(),
            profile_type: None,
            created_model_id: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn with_type(mut self, profile_type: impl Into<String>) -> Self {
        self.profile_type = Some(profile_type.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub apps: Vec<ProfileEntry>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let manifest = Self::from_yaml(&content).map_err(|source| ProfileError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        for name in manifest.duplicate_names() {
            warn!(
                "Profile name '{}' appears more than once in {}; only the first entry receives created_model_id",
                name,
                path.display()
            );
        }

        debug!("Loaded {} profiles from {}", manifest.apps.len(), path.display());
        Ok(manifest)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, ProfileError> {
        serde_yaml::to_string(self).map_err(ProfileError::Serialize)
    }

    /// Writes the whole manifest to `path`, replacing the file through a
    /// rename so readers never observe a partial document.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let yaml = self.to_yaml()?;
        let io_err = |source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(yaml.as_bytes()).map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&ProfileEntry> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// Entries selected by an optional name filter, in manifest order.
    pub fn matching<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ProfileEntry> + 'a {
        self.apps
            .iter()
            .filter(move |app| name.map_or(true, |n| app.name == n))
    }

    /// Sets `created_model_id` on the first entry named `name`.
    pub fn set_created_id(&mut self, name: &str, id: &str) -> Result<(), ProfileError> {
        let entry = self
            .apps
            .iter_mut()
            .find(|app| app.name == name)
            .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))?;
        entry.created_model_id = Some(id.to_string());
        Ok(())
    }

    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for app in &self.apps {
            if !seen.insert(app.name.as_str()) && !duplicates.contains(&app.name.as_str()) {
                duplicates.push(app.name.as_str());
            }
        }
        duplicates
    }
}

/// Re-reads the manifest at `path`, records `id` as the created identifier
/// of profile `name` and rewrites the file.
pub fn record_created_id(path: &Path, name: &str, id: &str) -> Result<(), ProfileError> {
    let mut manifest = Manifest::load(path)?;
    manifest.set_created_id(name, id)?;
    manifest.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
apps:
  - name: chat-app
    model_id: arn:aws:bedrock:ap-southeast-2::foundation-model/anthropic.claude-3-haiku-20240307-v1:0
    description: Chat assistant
    tags:
      - key: team
        value: platform
      - key: cost-center
        value: "4411"
    type: APPLICATION
  - name: summarizer
    model_id: arn:aws:bedrock:ap-southeast-2::foundation-model/amazon.titan-text-express-v1
"#;

    fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("profiles.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn should_deserialize_manifest_entries_in_order() {
        let manifest = Manifest::from_yaml(SAMPLE).unwrap();

        assert_eq!(manifest.apps.len(), 2);
        assert_eq!(manifest.apps[0].name, "chat-app");
        assert_eq!(manifest.apps[1].name, "summarizer");

        let chat = &manifest.apps[0];
        assert_eq!(chat.description.as_deref(), Some("Chat assistant"));
        assert_eq!(chat.profile_type.as_deref(), Some("APPLICATION"));
        assert_eq!(
            chat.tags,
            vec![Tag::new("team", "platform"), Tag::new("cost-center", "4411")]
        );
        assert_eq!(chat.created_model_id, None);
    }

    #[test]
    fn should_default_optional_fields() {
        let manifest = Manifest::from_yaml("apps:\n  - name: bare\n").unwrap();
        let entry = &manifest.apps[0];

        assert_eq!(entry, &ProfileEntry::new("bare"));
    }

    #[test]
    fn should_return_io_error_for_missing_file() {
        let result = Manifest::load(Path::new("/non/existent/profiles.yaml"));
        assert!(matches!(result, Err(ProfileError::Io { .. })));
    }

    #[test]
    fn should_return_parse_error_for_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "apps: [unclosed");

        let result = Manifest::load(&path);
        assert!(matches!(result, Err(ProfileError::Parse { .. })));
    }

    #[test]
    fn should_record_created_id_for_named_entry_only() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, SAMPLE);

        record_created_id(&path, "summarizer", "arn:aws:bedrock:ap-southeast-2:123456789012:application-inference-profile/abc123").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.apps[0].created_model_id, None);
        assert_eq!(
            manifest.apps[1].created_model_id.as_deref(),
            Some("arn:aws:bedrock:ap-southeast-2:123456789012:application-inference-profile/abc123")
        );
    }

    #[test]
    fn should_update_first_match_when_names_are_duplicated() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "apps:\n  - name: dup\n    model_id: m1\n  - name: dup\n    model_id: m2\n",
        );

        record_created_id(&path, "dup", "arn:1").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.apps[0].created_model_id.as_deref(), Some("arn:1"));
        assert_eq!(manifest.apps[1].created_model_id, None);
        assert_eq!(manifest.duplicate_names(), vec!["dup"]);
    }

    #[test]
    fn should_fail_to_record_unknown_profile() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, SAMPLE);

        let result = record_created_id(&path, "missing", "arn:1");
        assert!(matches!(result, Err(ProfileError::ProfileNotFound(name)) if name == "missing"));

        let untouched = fs::read_to_string(&path).unwrap();
        assert_eq!(untouched, SAMPLE);
    }

    #[test]
    fn should_preserve_unknown_keys_on_write_back() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "owner: ml-platform\napps:\n  - name: foo\n    model_id: m1\n    notes: keep me\n",
        );

        record_created_id(&path, "foo", "arn:1").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(
            manifest.extra.get("owner"),
            Some(&serde_yaml::Value::String("ml-platform".to_string()))
        );
        assert_eq!(
            manifest.apps[0].extra.get("notes"),
            Some(&serde_yaml::Value::String("keep me".to_string()))
        );
        assert_eq!(manifest.apps[0].created_model_id.as_deref(), Some("arn:1"));
    }

    #[test]
    fn should_filter_matching_entries_by_name() {
        let manifest = Manifest::from_yaml(SAMPLE).unwrap();

        let all: Vec<_> = manifest.matching(None).map(|a| a.name.as_str()).collect();
        assert_eq!(all, vec!["chat-app", "summarizer"]);

        let one: Vec<_> = manifest
            .matching(Some("summarizer"))
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(one, vec!["summarizer"]);

        assert_eq!(manifest.matching(Some("nope")).count(), 0);
    }

    #[test]
    fn should_serialize_type_field_under_its_yaml_name() {
        let manifest = Manifest {
            apps: vec![ProfileEntry::new("foo").with_type("APPLICATION")],
            extra: BTreeMap::new(),
        };

        let yaml = manifest.to_yaml().unwrap();
        assert!(yaml.contains("type: APPLICATION"));
        assert!(!yaml.contains("profile_type"));
        assert!(!yaml.contains("tags"));
    }
}
