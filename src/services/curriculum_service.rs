use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Grade, LearningOutcome, OutcomeContext, Strand, SubStrand, Subject},
    repositories::CurriculumRepository,
};

pub struct CurriculumService {
    repository: Arc<dyn CurriculumRepository>,
}

impl CurriculumService {
    pub fn new(repository: Arc<dyn CurriculumRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        self.repository.list_subjects().await
    }

    pub async fn list_grades(&self) -> AppResult<Vec<Grade>> {
        self.repository.list_grades().await
    }

    pub async fn list_strands(&self, subject_id: &str, grade_id: &str) -> AppResult<Vec<Strand>> {
        self.repository.list_strands(subject_id, grade_id).await
    }

    pub async fn list_all_strands(&self) -> AppResult<Vec<Strand>> {
        self.repository.list_all_strands().await
    }

    pub async fn list_substrands(&self, strand_id: &str) -> AppResult<Vec<SubStrand>> {
        self.repository.list_substrands(strand_id).await
    }

    pub async fn list_learning_outcomes(&self, substrand_id: &str) -> AppResult<Vec<LearningOutcome>> {
        self.repository.list_learning_outcomes(substrand_id).await
    }

    pub async fn outcomes_for_strand(&self, strand_id: &str) -> AppResult<Vec<LearningOutcome>> {
        self.repository.list_outcomes_for_strand(strand_id).await
    }

    pub async fn get_subject(&self, id: &str) -> AppResult<Subject> {
        self.repository
            .find_subject(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid subject_id or grade_id".to_string()))
    }

    pub async fn get_grade(&self, id: &str) -> AppResult<Grade> {
        self.repository
            .find_grade(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid subject_id or grade_id".to_string()))
    }

    pub async fn find_strand(&self, id: &str) -> AppResult<Option<Strand>> {
        self.repository.find_strand(id).await
    }

    /// Resolves the full ancestry of a learning outcome into the names the
    /// prompt builder needs. An unknown outcome is a caller error; a broken
    /// chain above it is a data integrity failure.
    pub async fn outcome_context(&self, learning_outcome_id: &str) -> AppResult<OutcomeContext> {
        let outcome = self
            .repository
            .find_learning_outcome(learning_outcome_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Learning Outcome ID {} not found",
                    learning_outcome_id
                ))
            })?;

        let chain = async {
            let substrand = self.repository.find_substrand(&outcome.substrand_id).await?;
            let Some(substrand) = substrand else {
                return Ok::<_, AppError>(None);
            };

            let strand = self.repository.find_strand(&substrand.strand_id).await?;
            let Some(strand) = strand else {
                return Ok(None);
            };

            let subject = self.repository.find_subject(&strand.subject_id).await?;
            let grade = self.repository.find_grade(&strand.grade_id).await?;
            match (subject, grade) {
                (Some(subject), Some(grade)) => {
                    Ok(Some((substrand, strand, subject, grade)))
                }
                _ => Ok(None),
            }
        }
        .await?;

        let Some((substrand, strand, subject, grade)) = chain else {
            log::error!(
                "Incomplete context for learning outcome {}",
                learning_outcome_id
            );
            return Err(AppError::InternalError(
                "Could not retrieve full context".to_string(),
            ));
        };

        Ok(OutcomeContext {
            subject: subject.name,
            grade: grade.name,
            strand: strand.name,
            substrand: substrand.name,
            outcome_description: outcome.description,
        })
    }

    pub async fn delete_subject(&self, id: &str) -> AppResult<()> {
        self.repository.delete_subject(id).await
    }

    pub async fn delete_grade(&self, id: &str) -> AppResult<()> {
        self.repository.delete_grade(id).await
    }

    pub async fn delete_strand(&self, id: &str) -> AppResult<()> {
        self.repository.delete_strand(id).await
    }

    pub async fn delete_substrand(&self, id: &str) -> AppResult<()> {
        self.repository.delete_substrand(id).await
    }
}
