use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("Profile '{profile}' is missing required field '{field}'")]
    MissingField { profile: String, field: &'static str },

    #[error("{operation} failed: {message}")]
    Provider { operation: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProfileError {
    pub fn provider(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ProfileError::Provider {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error should abort the whole invocation rather
    /// than just the operation for one profile
    pub fn is_fatal(&self) -> bool {
        match self {
            ProfileError::Io { .. } => true,
            ProfileError::Parse { .. } => true,
            ProfileError::Config(_) => true,
            ProfileError::Serialize(_) => false,
            ProfileError::ProfileNotFound(_) => false,
            ProfileError::MissingField { .. } => false,
            ProfileError::Provider { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_local_load_failures_as_fatal() {
        let io = ProfileError::Io {
            path: "profiles.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(io.is_fatal());
        assert!(ProfileError::Config("bad region".to_string()).is_fatal());
    }

    #[test]
    fn should_treat_remote_failures_as_non_fatal() {
        assert!(!ProfileError::provider("CreateInferenceProfile", "AccessDenied").is_fatal());
        assert!(!ProfileError::ProfileNotFound("foo".to_string()).is_fatal());
        assert!(!ProfileError::MissingField {
            profile: "foo".to_string(),
            field: "model_id",
        }
        .is_fatal());
    }

    #[test]
    fn should_format_provider_error_message() {
        let error = ProfileError::provider("ListInferenceProfiles", "ThrottlingException");
        assert_eq!(
            error.to_string(),
            "ListInferenceProfiles failed: ThrottlingException"
        );
    }

    #[test]
    fn should_format_missing_field_message() {
        let error = ProfileError::MissingField {
            profile: "chat-app".to_string(),
            field: "model_id",
        };
        assert_eq!(
            error.to_string(),
            "Profile 'chat-app' is missing required field 'model_id'"
        );
    }
}
