use serde::Serialize;

use crate::models::domain::{Grade, LearningOutcome, Strand, SubStrand, Subject, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectResponse {
    pub id: String,
    pub name: String,
}

impl From<&Subject> for SubjectResponse {
    fn from(subject: &Subject) -> Self {
        SubjectResponse {
            id: subject.id.clone(),
            name: subject.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeResponse {
    pub id: String,
    pub name: String,
}

impl From<&Grade> for GradeResponse {
    fn from(grade: &Grade) -> Self {
        GradeResponse {
            id: grade.id.clone(),
            name: grade.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrandResponse {
    pub id: String,
    pub name: String,
    pub subject_id: String,
    pub grade_id: String,
}

impl From<&Strand> for StrandResponse {
    fn from(strand: &Strand) -> Self {
        StrandResponse {
            id: strand.id.clone(),
            name: strand.name.clone(),
            subject_id: strand.subject_id.clone(),
            grade_id: strand.grade_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubStrandResponse {
    pub id: String,
    pub name: String,
    pub strand_id: String,
}

impl From<&SubStrand> for SubStrandResponse {
    fn from(substrand: &SubStrand) -> Self {
        SubStrandResponse {
            id: substrand.id.clone(),
            name: substrand.name.clone(),
            strand_id: substrand.strand_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningOutcomeResponse {
    pub id: String,
    pub description: String,
    pub substrand_id: String,
}

impl From<&LearningOutcome> for LearningOutcomeResponse {
    fn from(outcome: &LearningOutcome) -> Self {
        LearningOutcomeResponse {
            id: outcome.id.clone(),
            description: outcome.description.clone(),
            substrand_id: outcome.substrand_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User::new("a@b.com", "hash");
        let response = UserResponse::from(&user);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("password_hash").is_none());
    }
}
