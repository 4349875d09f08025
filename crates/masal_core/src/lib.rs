pub mod catalog;
pub mod domain;
pub mod error;
pub mod generation;
pub mod moderation;
pub mod ports;
pub mod slug;

pub use domain::{
    AdminUserUpdate, AuthSession, CreditRequest, CreditRequestStatus, DashboardStats,
    ModerationVerdict, NewUser, OAuthProfile, ProfileUpdate, Role, Story, StoryQuery, StorySort,
    User, DEFAULT_CREDITS,
};
pub use error::{ServiceError, ServiceResult};
pub use generation::{GeneratedStory, StoryGenerator, StoryRequest};
pub use ports::{
    DatabaseService, ModerationService, OAuthService, PortError, PortResult, StoryTextService,
    TextToSpeechService,
};
