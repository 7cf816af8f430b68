pub mod config;
pub mod errors;
pub mod manifest;

pub use config::{AwsConfig, ManifestConfig, ToolConfig};
pub use errors::ProfileError;
pub use manifest::{record_created_id, Manifest, ProfileEntry, Tag};
