use clap::Parser;
use profile_core::{ProfileError, ToolConfig};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: profilectl <action> [profile_name]\nActions: create, update, delete, list";

#[derive(Debug, Parser)]
#[command(
    name = "profilectl",
    version,
    about = "Manage Amazon Bedrock inference profiles from a YAML manifest"
)]
pub struct Cli {
    /// create, update, delete or list
    pub action: Option<String>,

    /// Restricts update to one profile; required by delete
    pub profile_name: Option<String>,

    /// Manifest file [default: profiles.yaml]
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// AWS region [default: ap-southeast-2]
    #[arg(long)]
    pub region: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long = "aws-profile")]
    pub aws_profile: Option<String>,

    /// TOML config file [default: ./profilectl.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave system-defined profiles out of the listing
    #[arg(long = "application-only")]
    pub application_only: bool,

    /// Positional arguments past the profile name are accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,
}

impl Cli {
    /// Config file, then environment, then flags; later sources win.
    pub fn resolve_config(&self) -> Result<ToolConfig, ProfileError> {
        let mut config = ToolConfig::load_from_env(self.config.as_deref())?.with_env_overrides();

        if let Some(region) = &self.region {
            config.aws.region = region.clone();
        }
        if let Some(profile) = &self.aws_profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(manifest) = &self.manifest {
            config.manifest.path = manifest.clone();
        }
        Ok(config)
    }
}
