use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, message = "learning_outcome_id is required"))]
    pub learning_outcome_id: String,

    pub num_questions: i64,

    #[validate(length(min = 1, message = "question_type is required"))]
    pub question_type: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateTestRequest {
    #[validate(length(min = 1, message = "subject_id is required"))]
    pub subject_id: String,

    #[validate(length(min = 1, message = "grade_id is required"))]
    pub grade_id: String,

    pub topics: Vec<TopicRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicRequest {
    pub strand_id: String,

    #[serde(default = "default_topic_questions")]
    pub num_questions: i64,
}

fn default_topic_questions() -> i64 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrandQuery {
    pub subject_id: Option<String>,
    pub grade_id: Option<String>,
    pub all: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubStrandQuery {
    pub strand_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LearningOutcomeQuery {
    pub substrand_id: Option<String>,
}
