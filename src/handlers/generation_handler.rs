use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppResult,
    models::dto::{GenerateQuestionsRequest, GenerateTestRequest},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/questions/generate", web::post().to(generate_questions))
        .route("/tests/generate", web::post().to(generate_test));
}

async fn generate_questions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<GenerateQuestionsRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let questions = state.generation_service.generate_questions(&payload).await?;

    log::info!(
        "User '{}' generated {} questions for learning outcome {}",
        auth.0.email,
        questions.len(),
        payload.learning_outcome_id
    );

    Ok(HttpResponse::Ok().json(questions))
}

async fn generate_test(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<GenerateTestRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let test = state.generation_service.generate_test(&payload).await?;

    log::info!(
        "User '{}' generated test '{}' with {} sections",
        auth.0.email,
        test.test_title,
        test.sections.len()
    );

    Ok(HttpResponse::Ok().json(test))
}
