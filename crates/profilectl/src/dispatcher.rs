use crate::operations;
use bedrock_profiles::{InferenceProfileService, ListScope};
use log::{debug, error};
use profile_core::{Manifest, ProfileError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    List,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "list" => Ok(Action::List),
            other => Err(other.to_string()),
        }
    }
}

/// Counts of remote operations for one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct Dispatcher<'a, W: Write> {
    service: &'a dyn InferenceProfileService,
    manifest_path: PathBuf,
    list_scope: ListScope,
    out: W,
    report: DispatchReport,
}

impl<'a, W: Write> Dispatcher<'a, W> {
    pub fn new(service: &'a dyn InferenceProfileService, manifest_path: &Path, out: W) -> Self {
        Self {
            service,
            manifest_path: manifest_path.to_path_buf(),
            list_scope: ListScope::default(),
            out,
            report: DispatchReport::default(),
        }
    }

    pub fn with_list_scope(mut self, scope: ListScope) -> Self {
        self.list_scope = scope;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs `action` against `manifest`. Provider failures are printed and
    /// counted; only failures to write output abort the run.
    pub async fn run(
        &mut self,
        action: &str,
        profile_name: Option<&str>,
        manifest: &Manifest,
    ) -> anyhow::Result<DispatchReport> {
        let action = match Action::from_str(action) {
            Ok(action) => action,
            Err(other) => {
                debug!("Unknown action '{}'", other);
                writeln!(
                    self.out,
                    "Invalid action. Use: create, update, delete, or list"
                )?;
                return Ok(self.report);
            }
        };

        match action {
            Action::List => {
                let result =
                    operations::list_profiles(self.service, self.list_scope, &mut self.out).await;
                self.record("listing inference profiles", result)?;
            }
            Action::Create => {
                for entry in &manifest.apps {
                    let result = operations::create_profile(
                        self.service,
                        entry,
                        &self.manifest_path,
                        &mut self.out,
                    )
                    .await;
                    self.record("creating inference profile", result)?;
                }
            }
            Action::Update => {
                for entry in manifest.matching(profile_name) {
                    let result =
                        operations::update_profile(self.service, entry, &mut self.out).await;
                    self.record("updating inference profile", result)?;
                }
            }
            Action::Delete => match profile_name {
                Some(name) => {
                    let result =
                        operations::delete_profile(self.service, name, &mut self.out).await;
                    self.record("deleting inference profile", result)?;
                }
                None => writeln!(self.out, "Profile name required for delete action")?,
            },
        }

        Ok(self.report)
    }

    fn record<T>(&mut self, what: &str, result: Result<T, ProfileError>) -> anyhow::Result<()> {
        self.report.attempted += 1;
        match result {
            Ok(_) => self.report.succeeded += 1,
            Err(e) => {
                self.report.failed += 1;
                error!("Error {}: {}", what, e);
                writeln!(self.out, "Error {}: {}", what, e)?;
            }
        }
        Ok(())
    }
}
