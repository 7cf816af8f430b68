use crate::errors::ProfileError;
use crate::manifest::DEFAULT_MANIFEST_PATH;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REGION: &str = "ap-southeast-2";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Named profile from the shared AWS config/credentials files
    pub profile: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            profile: None,
        }
    }
}

impl AwsConfig {
    pub fn with_env_overrides(&self) -> Self {
        let region = env::var("PROFILECTL_REGION").unwrap_or_else(|_| self.region.clone());
        let profile = env::var("PROFILECTL_AWS_PROFILE")
            .ok()
            .or_else(|| self.profile.clone());
        Self { region, profile }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

impl ManifestConfig {
    pub fn with_env_overrides(&self) -> Self {
        let path = env::var("PROFILECTL_MANIFEST")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.path.clone());
        Self { path }
    }
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_PATH)
}

impl ToolConfig {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProfileError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ProfileError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Resolves the config file: an explicit path must exist, the default
    /// location is optional and falls back to built-in defaults.
    pub fn load_from_env(explicit: Option<&Path>) -> Result<Self, ProfileError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = env::var("PROFILECTL_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let default_path = Self::default_config_path();
        if Path::new(&default_path).exists() {
            Self::load(Path::new(&default_path))
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> String {
        "./profilectl.toml".to_string()
    }

    pub fn with_env_overrides(&self) -> Self {
        Self {
            aws: self.aws.with_env_overrides(),
            manifest: self.manifest.with_env_overrides(),
        }
    }
}
