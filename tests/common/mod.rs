//! Shared in-memory repository for integration tests. Mirrors the storage
//! semantics the Mongo repository provides: natural-key uniqueness for the
//! hierarchy levels, find-or-create for every level, cascading deletes.

use std::sync::Mutex;

use async_trait::async_trait;

use cbc_curriculum_server::errors::{AppError, AppResult};
use cbc_curriculum_server::models::domain::{
    Grade, KeyInquiryQuestion, LearningOutcome, Strand, SubStrand, Subject, User,
};
use cbc_curriculum_server::repositories::{CurriculumRepository, UserRepository};

#[derive(Default)]
struct State {
    subjects: Vec<Subject>,
    grades: Vec<Grade>,
    strands: Vec<Strand>,
    substrands: Vec<SubStrand>,
    learning_outcomes: Vec<LearningOutcome>,
    key_inquiry_questions: Vec<KeyInquiryQuestion>,
}

#[derive(Default)]
pub struct InMemoryCurriculumRepository {
    state: Mutex<State>,
}

impl InMemoryCurriculumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> (usize, usize, usize, usize, usize, usize) {
        let state = self.state.lock().unwrap();
        (
            state.subjects.len(),
            state.grades.len(),
            state.strands.len(),
            state.substrands.len(),
            state.learning_outcomes.len(),
            state.key_inquiry_questions.len(),
        )
    }
}

#[async_trait]
impl CurriculumRepository for InMemoryCurriculumRepository {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        let mut subjects = self.state.lock().unwrap().subjects.clone();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn list_grades(&self) -> AppResult<Vec<Grade>> {
        let mut grades = self.state.lock().unwrap().grades.clone();
        grades.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(grades)
    }

    async fn list_strands(&self, subject_id: &str, grade_id: &str) -> AppResult<Vec<Strand>> {
        let mut strands: Vec<Strand> = self
            .state
            .lock()
            .unwrap()
            .strands
            .iter()
            .filter(|s| s.subject_id == subject_id && s.grade_id == grade_id)
            .cloned()
            .collect();
        strands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(strands)
    }

    async fn list_all_strands(&self) -> AppResult<Vec<Strand>> {
        let mut strands = self.state.lock().unwrap().strands.clone();
        strands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(strands)
    }

    async fn list_substrands(&self, strand_id: &str) -> AppResult<Vec<SubStrand>> {
        let mut substrands: Vec<SubStrand> = self
            .state
            .lock()
            .unwrap()
            .substrands
            .iter()
            .filter(|s| s.strand_id == strand_id)
            .cloned()
            .collect();
        substrands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(substrands)
    }

    async fn list_learning_outcomes(&self, substrand_id: &str) -> AppResult<Vec<LearningOutcome>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .learning_outcomes
            .iter()
            .filter(|o| o.substrand_id == substrand_id)
            .cloned()
            .collect())
    }

    async fn list_outcomes_for_strand(&self, strand_id: &str) -> AppResult<Vec<LearningOutcome>> {
        let state = self.state.lock().unwrap();
        let substrand_ids: Vec<&str> = state
            .substrands
            .iter()
            .filter(|s| s.strand_id == strand_id)
            .map(|s| s.id.as_str())
            .collect();

        Ok(state
            .learning_outcomes
            .iter()
            .filter(|o| substrand_ids.contains(&o.substrand_id.as_str()))
            .cloned()
            .collect())
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<Subject>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .subjects
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_grade(&self, id: &str) -> AppResult<Option<Grade>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .grades
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn find_strand(&self, id: &str) -> AppResult<Option<Strand>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .strands
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_substrand(&self, id: &str) -> AppResult<Option<SubStrand>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .substrands
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_learning_outcome(&self, id: &str) -> AppResult<Option<LearningOutcome>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .learning_outcomes
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn find_or_create_subject(&self, name: &str) -> AppResult<(Subject, bool)> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.subjects.iter().find(|s| s.name == name) {
            return Ok((existing.clone(), false));
        }
        let subject = Subject::new(name);
        state.subjects.push(subject.clone());
        Ok((subject, true))
    }

    async fn find_or_create_grade(&self, name: &str) -> AppResult<(Grade, bool)> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.grades.iter().find(|g| g.name == name) {
            return Ok((existing.clone(), false));
        }
        let grade = Grade::new(name);
        state.grades.push(grade.clone());
        Ok((grade, true))
    }

    async fn find_or_create_strand(
        &self,
        subject_id: &str,
        grade_id: &str,
        name: &str,
    ) -> AppResult<(Strand, bool)> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .strands
            .iter()
            .find(|s| s.subject_id == subject_id && s.grade_id == grade_id && s.name == name)
        {
            return Ok((existing.clone(), false));
        }
        let strand = Strand::new(name, subject_id, grade_id);
        state.strands.push(strand.clone());
        Ok((strand, true))
    }

    async fn find_or_create_substrand(
        &self,
        strand_id: &str,
        name: &str,
    ) -> AppResult<(SubStrand, bool)> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .substrands
            .iter()
            .find(|s| s.strand_id == strand_id && s.name == name)
        {
            return Ok((existing.clone(), false));
        }
        let substrand = SubStrand::new(name, strand_id);
        state.substrands.push(substrand.clone());
        Ok((substrand, true))
    }

    async fn find_or_create_learning_outcome(
        &self,
        substrand_id: &str,
        description: &str,
    ) -> AppResult<(LearningOutcome, bool)> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .learning_outcomes
            .iter()
            .find(|o| o.substrand_id == substrand_id && o.description == description)
        {
            return Ok((existing.clone(), false));
        }
        let outcome = LearningOutcome::new(description, substrand_id);
        state.learning_outcomes.push(outcome.clone());
        Ok((outcome, true))
    }

    async fn find_or_create_key_inquiry_question(
        &self,
        substrand_id: &str,
        question_text: &str,
    ) -> AppResult<(KeyInquiryQuestion, bool)> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .key_inquiry_questions
            .iter()
            .find(|q| q.substrand_id == substrand_id && q.question_text == question_text)
        {
            return Ok((existing.clone(), false));
        }
        let question = KeyInquiryQuestion::new(question_text, substrand_id);
        state.key_inquiry_questions.push(question.clone());
        Ok((question, true))
    }

    async fn delete_subject(&self, id: &str) -> AppResult<()> {
        let strand_ids: Vec<String> = {
            let state = self.state.lock().unwrap();
            state
                .strands
                .iter()
                .filter(|s| s.subject_id == id)
                .map(|s| s.id.clone())
                .collect()
        };
        for strand_id in strand_ids {
            self.delete_strand(&strand_id).await?;
        }
        self.state.lock().unwrap().subjects.retain(|s| s.id != id);
        Ok(())
    }

    async fn delete_grade(&self, id: &str) -> AppResult<()> {
        let strand_ids: Vec<String> = {
            let state = self.state.lock().unwrap();
            state
                .strands
                .iter()
                .filter(|s| s.grade_id == id)
                .map(|s| s.id.clone())
                .collect()
        };
        for strand_id in strand_ids {
            self.delete_strand(&strand_id).await?;
        }
        self.state.lock().unwrap().grades.retain(|g| g.id != id);
        Ok(())
    }

    async fn delete_strand(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let substrand_ids: Vec<String> = state
            .substrands
            .iter()
            .filter(|s| s.strand_id == id)
            .map(|s| s.id.clone())
            .collect();

        state
            .learning_outcomes
            .retain(|o| !substrand_ids.contains(&o.substrand_id));
        state
            .key_inquiry_questions
            .retain(|q| !substrand_ids.contains(&q.substrand_id));
        state.substrands.retain(|s| s.strand_id != id);
        state.strands.retain(|s| s.id != id);
        Ok(())
    }

    async fn delete_substrand(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.learning_outcomes.retain(|o| o.substrand_id != id);
        state.key_inquiry_questions.retain(|q| q.substrand_id != id);
        state.substrands.retain(|s| s.id != id);
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
