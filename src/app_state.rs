use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        CurriculumRepository, MongoCurriculumRepository, MongoUserRepository, UserRepository,
    },
    services::{CurriculumService, GenerationService, GenerativeModel, UserService},
};

/// Shared application state handed to every handler.
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub curriculum_service: Arc<CurriculumService>,
    pub generation_service: Arc<GenerationService>,
    pub config: Config,
}

impl AppState {
    /// Connects to storage, ensures indexes, and wires the service graph.
    pub async fn new(config: Config, model: Arc<dyn GenerativeModel>) -> AppResult<Self> {
        let database = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&database));
        let curriculum_repository = Arc::new(MongoCurriculumRepository::new(&database));

        user_repository.ensure_indexes().await?;
        curriculum_repository.ensure_indexes().await?;

        let user_service = Arc::new(UserService::new(user_repository));
        let curriculum_service = Arc::new(CurriculumService::new(curriculum_repository));
        let generation_service = Arc::new(GenerationService::new(
            Arc::clone(&curriculum_service),
            model,
        ));

        Ok(Self {
            user_service,
            curriculum_service,
            generation_service,
            config,
        })
    }
}
