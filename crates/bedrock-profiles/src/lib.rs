pub mod bedrock;
pub mod models;
pub mod service;

pub use bedrock::BedrockProfileClient;
pub use models::{
    CreateProfileRequest, CreatedProfile, DeletedProfile, ListScope, ProfileSummary,
    UpdateProfileRequest, UpdatedProfile,
};
pub use service::InferenceProfileService;
