pub mod curriculum_service;
pub mod generation_service;
pub mod import_service;
pub mod model_service;
pub mod prompt;
pub mod response;
pub mod user_service;

pub use curriculum_service::CurriculumService;
pub use generation_service::GenerationService;
pub use import_service::{ImportService, ImportSummary};
pub use model_service::{DisabledModel, GeminiModel, GenerativeModel};
pub use user_service::UserService;
