pub mod auth_handler;
pub mod curriculum_handler;
pub mod generation_handler;

use actix_web::web;

/// Mounts the full API under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(auth_handler::configure)
            .configure(curriculum_handler::configure)
            .configure(generation_handler::configure),
    );
}
