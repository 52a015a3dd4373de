use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use cbc_curriculum_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    handlers,
    services::{DisabledModel, GeminiModel, GenerativeModel},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.warn_on_dev_defaults();

    let model: Arc<dyn GenerativeModel> = match config.gemini_api_key.clone() {
        Some(api_key) => {
            let gemini = GeminiModel::new(api_key, &config.ai_model_name)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            log::info!("AI generation enabled with model '{}'", config.ai_model_name);
            Arc::new(gemini)
        }
        None => Arc::new(DisabledModel),
    };

    let jwt_service = web::Data::new(JwtService::new(&config.jwt_secret, config.session_hours));

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config, model)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = web::Data::new(state);

    log::info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
