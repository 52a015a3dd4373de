use std::sync::Arc;

use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{GeneratedTest, QuestionType},
        dto::{GenerateQuestionsRequest, GenerateTestRequest},
    },
    services::{
        curriculum_service::CurriculumService,
        model_service::GenerativeModel,
        prompt::{self, PromptSection, MAX_QUESTIONS, MIN_QUESTIONS},
        response,
    },
};

pub struct GenerationService {
    curriculum: Arc<CurriculumService>,
    model: Arc<dyn GenerativeModel>,
}

impl GenerationService {
    pub fn new(curriculum: Arc<CurriculumService>, model: Arc<dyn GenerativeModel>) -> Self {
        Self { curriculum, model }
    }

    /// Generates a batch of questions for a single learning outcome. Request
    /// fields are validated before any storage lookup.
    pub async fn generate_questions(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> AppResult<Vec<Value>> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&request.num_questions) {
            return Err(AppError::ValidationError(format!(
                "num_questions must be between {} and {}",
                MIN_QUESTIONS, MAX_QUESTIONS
            )));
        }

        let question_type = QuestionType::parse(&request.question_type).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Unsupported question_type: {}",
                request.question_type
            ))
        })?;

        let context = self
            .curriculum
            .outcome_context(&request.learning_outcome_id)
            .await?;

        let prompt = prompt::build_outcome_prompt(&context, request.num_questions, question_type);
        log::debug!("Question prompt:\n{}", prompt);

        let raw = self.model.generate_content(&prompt).await?;
        let questions = response::parse_question_list(&raw)?;

        log::info!(
            "Generated {} questions for learning outcome {}",
            questions.len(),
            request.learning_outcome_id
        );

        Ok(questions)
    }

    /// Generates a full multi-section test. Topics that do not resolve to a
    /// known strand, or whose strand has no learning outcomes, are skipped
    /// with a warning; a request where every topic is skipped is rejected.
    pub async fn generate_test(&self, request: &GenerateTestRequest) -> AppResult<GeneratedTest> {
        if request.topics.is_empty() {
            return Err(AppError::ValidationError(
                "Missing or invalid required fields: subject_id, grade_id, topics".to_string(),
            ));
        }

        let subject = self.curriculum.get_subject(&request.subject_id).await?;
        let grade = self.curriculum.get_grade(&request.grade_id).await?;

        let mut sections = Vec::new();
        for (i, topic) in request.topics.iter().enumerate() {
            let Some(strand) = self.curriculum.find_strand(&topic.strand_id).await? else {
                log::warn!("Skipping unknown strand {} in test request", topic.strand_id);
                continue;
            };

            let outcomes = self.curriculum.outcomes_for_strand(&strand.id).await?;
            if outcomes.is_empty() {
                log::warn!(
                    "Skipping strand '{}' with no learning outcomes",
                    strand.name
                );
                continue;
            }

            sections.push(PromptSection {
                index: i + 1,
                strand_name: strand.name,
                num_questions: topic.num_questions,
                outcome_descriptions: outcomes.into_iter().map(|o| o.description).collect(),
            });
        }

        if sections.is_empty() {
            return Err(AppError::ValidationError(
                "No valid topics with learning outcomes found".to_string(),
            ));
        }

        let prompt = prompt::build_test_prompt(&subject.name, &grade.name, &sections);
        log::debug!("Test prompt:\n{}", prompt);

        let raw = self.model.generate_content(&prompt).await?;
        response::parse_generated_test(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{Grade, LearningOutcome, Strand, SubStrand, Subject},
        models::dto::TopicRequest,
        repositories::MockCurriculumRepository,
        services::model_service::MockGenerativeModel,
    };

    struct Fixture {
        subject: Subject,
        grade: Grade,
        strand: Strand,
        substrand: SubStrand,
        outcome: LearningOutcome,
    }

    fn fixture() -> Fixture {
        let subject = Subject::new("Mathematics");
        let grade = Grade::new("Grade 4");
        let strand = Strand::new("Numbers", &subject.id, &grade.id);
        let substrand = SubStrand::new("Whole Numbers", &strand.id);
        let outcome = LearningOutcome::new("Count to 100", &substrand.id);
        Fixture {
            subject,
            grade,
            strand,
            substrand,
            outcome,
        }
    }

    fn service_with(
        repository: MockCurriculumRepository,
        model: MockGenerativeModel,
    ) -> GenerationService {
        let curriculum = Arc::new(CurriculumService::new(Arc::new(repository)));
        GenerationService::new(curriculum, Arc::new(model))
    }

    fn wire_context(repository: &mut MockCurriculumRepository, fx: &Fixture) {
        let outcome = fx.outcome.clone();
        repository
            .expect_find_learning_outcome()
            .returning(move |_| Ok(Some(outcome.clone())));
        let substrand = fx.substrand.clone();
        repository
            .expect_find_substrand()
            .returning(move |_| Ok(Some(substrand.clone())));
        let strand = fx.strand.clone();
        repository
            .expect_find_strand()
            .returning(move |_| Ok(Some(strand.clone())));
        let subject = fx.subject.clone();
        repository
            .expect_find_subject()
            .returning(move |_| Ok(Some(subject.clone())));
        let grade = fx.grade.clone();
        repository
            .expect_find_grade()
            .returning(move |_| Ok(Some(grade.clone())));
    }

    #[actix_rt::test]
    async fn test_rejects_out_of_range_count_before_lookup() {
        // No repository or model expectations: validation must short-circuit.
        let service = service_with(MockCurriculumRepository::new(), MockGenerativeModel::new());

        for num_questions in [0, -1, 21] {
            let request = GenerateQuestionsRequest {
                learning_outcome_id: "lo-1".to_string(),
                num_questions,
                question_type: "multiple_choice".to_string(),
            };
            let result = service.generate_questions(&request).await;
            assert!(matches!(result, Err(AppError::ValidationError(_))));
        }
    }

    #[actix_rt::test]
    async fn test_rejects_unknown_question_type_before_lookup() {
        let service = service_with(MockCurriculumRepository::new(), MockGenerativeModel::new());

        let request = GenerateQuestionsRequest {
            learning_outcome_id: "lo-1".to_string(),
            num_questions: 5,
            question_type: "essay".to_string(),
        };
        let result = service.generate_questions(&request).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_generate_questions_happy_path() {
        let fx = fixture();
        let mut repository = MockCurriculumRepository::new();
        wire_context(&mut repository, &fx);

        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_content()
            .withf(|prompt: &str| {
                prompt.contains("Generate 2 unique question(s)")
                    && prompt.contains("- Subject: Mathematics")
            })
            .returning(|_| {
                Ok("```json\n[{\"type\": \"short_answer\", \"question\": \"Q?\", \
                    \"answer\": \"A\", \"taxonomy_level\": \"Applying\"}]\n```"
                    .to_string())
            });

        let service = service_with(repository, model);
        let request = GenerateQuestionsRequest {
            learning_outcome_id: fx.outcome.id.clone(),
            num_questions: 2,
            question_type: "short_answer".to_string(),
        };

        let questions = service.generate_questions(&request).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["taxonomy_level"], "Applying");
    }

    #[actix_rt::test]
    async fn test_generate_test_skips_bad_topics_and_builds_sections() {
        let fx = fixture();
        let mut repository = MockCurriculumRepository::new();

        {
            let subject = fx.subject.clone();
            repository
                .expect_find_subject()
                .returning(move |_| Ok(Some(subject.clone())));
        }
        {
            let grade = fx.grade.clone();
            repository
                .expect_find_grade()
                .returning(move |_| Ok(Some(grade.clone())));
        }
        {
            let strand = fx.strand.clone();
            repository.expect_find_strand().returning(move |id| {
                if id == strand.id {
                    Ok(Some(strand.clone()))
                } else {
                    Ok(None)
                }
            });
        }
        {
            let outcome = fx.outcome.clone();
            repository
                .expect_list_outcomes_for_strand()
                .returning(move |_| Ok(vec![outcome.clone()]));
        }

        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_content()
            .withf(|prompt: &str| {
                prompt.contains("**Section 2: Numbers**") && !prompt.contains("Section 1:")
            })
            .returning(|_| {
                Ok(r#"{"test_title": "Grade 4 Mathematics Test", "sections": [
                    {"section_title": "Section 2: Numbers", "questions": []}
                ]}"#
                .to_string())
            });

        let service = service_with(repository, model);
        let request = GenerateTestRequest {
            subject_id: fx.subject.id.clone(),
            grade_id: fx.grade.id.clone(),
            topics: vec![
                TopicRequest {
                    strand_id: "missing-strand".to_string(),
                    num_questions: 3,
                },
                TopicRequest {
                    strand_id: fx.strand.id.clone(),
                    num_questions: 4,
                },
            ],
        };

        let test = service.generate_test(&request).await.unwrap();
        assert_eq!(test.test_title, "Grade 4 Mathematics Test");
        assert_eq!(test.sections.len(), 1);
    }

    #[actix_rt::test]
    async fn test_generate_test_rejects_empty_topics() {
        let service = service_with(MockCurriculumRepository::new(), MockGenerativeModel::new());

        let request = GenerateTestRequest {
            subject_id: "s".to_string(),
            grade_id: "g".to_string(),
            topics: vec![],
        };
        let result = service.generate_test(&request).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_generate_test_rejects_all_topics_skipped() {
        let fx = fixture();
        let mut repository = MockCurriculumRepository::new();

        {
            let subject = fx.subject.clone();
            repository
                .expect_find_subject()
                .returning(move |_| Ok(Some(subject.clone())));
        }
        {
            let grade = fx.grade.clone();
            repository
                .expect_find_grade()
                .returning(move |_| Ok(Some(grade.clone())));
        }
        repository.expect_find_strand().returning(|_| Ok(None));

        let service = service_with(repository, MockGenerativeModel::new());
        let request = GenerateTestRequest {
            subject_id: fx.subject.id.clone(),
            grade_id: fx.grade.id.clone(),
            topics: vec![TopicRequest {
                strand_id: "missing".to_string(),
                num_questions: 3,
            }],
        };

        let result = service.generate_test(&request).await;
        match result {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, "No valid topics with learning outcomes found")
            }
            other => panic!("expected ValidationError, got {:?}", other.map(|_| ())),
        }
    }
}
