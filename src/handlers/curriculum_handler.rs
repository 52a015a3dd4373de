use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::dto::{
        GradeResponse, LearningOutcomeQuery, LearningOutcomeResponse, StrandQuery, StrandResponse,
        SubStrandQuery, SubStrandResponse, SubjectResponse,
    },
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/subjects", web::get().to(subjects))
        .route("/grades", web::get().to(grades))
        .route("/strands", web::get().to(strands))
        .route("/substrands", web::get().to(substrands))
        .route("/learning_outcomes", web::get().to(learning_outcomes));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn subjects(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let subjects = state.curriculum_service.list_subjects().await?;
    let body: Vec<SubjectResponse> = subjects.iter().map(SubjectResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn grades(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let grades = state.curriculum_service.list_grades().await?;
    let body: Vec<GradeResponse> = grades.iter().map(GradeResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Lists strands for a subject/grade pair, or every strand when `all=true`.
async fn strands(
    state: web::Data<AppState>,
    query: web::Query<StrandQuery>,
) -> AppResult<HttpResponse> {
    let strands = if query.all.as_deref() == Some("true") {
        state.curriculum_service.list_all_strands().await?
    } else {
        let (Some(subject_id), Some(grade_id)) = (&query.subject_id, &query.grade_id) else {
            return Err(AppError::ValidationError(
                "subject_id and grade_id are required".to_string(),
            ));
        };
        state
            .curriculum_service
            .list_strands(subject_id, grade_id)
            .await?
    };

    let body: Vec<StrandResponse> = strands.iter().map(StrandResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn substrands(
    state: web::Data<AppState>,
    query: web::Query<SubStrandQuery>,
) -> AppResult<HttpResponse> {
    let Some(strand_id) = &query.strand_id else {
        return Err(AppError::ValidationError(
            "strand_id is required".to_string(),
        ));
    };

    let substrands = state.curriculum_service.list_substrands(strand_id).await?;
    let body: Vec<SubStrandResponse> = substrands.iter().map(SubStrandResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn learning_outcomes(
    state: web::Data<AppState>,
    query: web::Query<LearningOutcomeQuery>,
) -> AppResult<HttpResponse> {
    let Some(substrand_id) = &query.substrand_id else {
        return Err(AppError::ValidationError(
            "substrand_id is required".to_string(),
        ));
    };

    let outcomes = state
        .curriculum_service
        .list_learning_outcomes(substrand_id)
        .await?;
    let body: Vec<LearningOutcomeResponse> =
        outcomes.iter().map(LearningOutcomeResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
