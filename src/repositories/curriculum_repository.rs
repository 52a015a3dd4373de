use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Grade, KeyInquiryQuestion, LearningOutcome, Strand, SubStrand, Subject},
    repositories::is_duplicate_key,
};

/// Read and find-or-create access to the curriculum hierarchy. Hierarchy rows
/// are written only through the find-or-create methods (the importer path) or
/// removed through the cascading deletes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>>;
    async fn list_grades(&self) -> AppResult<Vec<Grade>>;
    async fn list_strands(&self, subject_id: &str, grade_id: &str) -> AppResult<Vec<Strand>>;
    async fn list_all_strands(&self) -> AppResult<Vec<Strand>>;
    async fn list_substrands(&self, strand_id: &str) -> AppResult<Vec<SubStrand>>;
    async fn list_learning_outcomes(&self, substrand_id: &str) -> AppResult<Vec<LearningOutcome>>;
    /// Every learning outcome under any sub-strand of the given strand.
    async fn list_outcomes_for_strand(&self, strand_id: &str) -> AppResult<Vec<LearningOutcome>>;

    async fn find_subject(&self, id: &str) -> AppResult<Option<Subject>>;
    async fn find_grade(&self, id: &str) -> AppResult<Option<Grade>>;
    async fn find_strand(&self, id: &str) -> AppResult<Option<Strand>>;
    async fn find_substrand(&self, id: &str) -> AppResult<Option<SubStrand>>;
    async fn find_learning_outcome(&self, id: &str) -> AppResult<Option<LearningOutcome>>;

    async fn find_or_create_subject(&self, name: &str) -> AppResult<(Subject, bool)>;
    async fn find_or_create_grade(&self, name: &str) -> AppResult<(Grade, bool)>;
    async fn find_or_create_strand(
        &self,
        subject_id: &str,
        grade_id: &str,
        name: &str,
    ) -> AppResult<(Strand, bool)>;
    async fn find_or_create_substrand(
        &self,
        strand_id: &str,
        name: &str,
    ) -> AppResult<(SubStrand, bool)>;
    async fn find_or_create_learning_outcome(
        &self,
        substrand_id: &str,
        description: &str,
    ) -> AppResult<(LearningOutcome, bool)>;
    async fn find_or_create_key_inquiry_question(
        &self,
        substrand_id: &str,
        question_text: &str,
    ) -> AppResult<(KeyInquiryQuestion, bool)>;

    async fn delete_subject(&self, id: &str) -> AppResult<()>;
    async fn delete_grade(&self, id: &str) -> AppResult<()>;
    async fn delete_strand(&self, id: &str) -> AppResult<()>;
    async fn delete_substrand(&self, id: &str) -> AppResult<()>;

    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCurriculumRepository {
    subjects: Collection<Subject>,
    grades: Collection<Grade>,
    strands: Collection<Strand>,
    substrands: Collection<SubStrand>,
    learning_outcomes: Collection<LearningOutcome>,
    key_inquiry_questions: Collection<KeyInquiryQuestion>,
}

impl MongoCurriculumRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            subjects: db.get_collection("subjects"),
            grades: db.get_collection("grades"),
            strands: db.get_collection("strands"),
            substrands: db.get_collection("substrands"),
            learning_outcomes: db.get_collection("learning_outcomes"),
            key_inquiry_questions: db.get_collection("key_inquiry_questions"),
        }
    }

    fn by_name_asc() -> FindOptions {
        FindOptions::builder().sort(doc! { "name": 1 }).build()
    }

    fn by_insertion_order() -> FindOptions {
        FindOptions::builder().sort(doc! { "created_at": 1 }).build()
    }

    /// Race-safe find-or-create: query by natural key, insert if absent, and
    /// on a duplicate-key failure re-query so the concurrent writer's row
    /// wins without surfacing an error.
    async fn find_or_create<T, F>(
        collection: &Collection<T>,
        filter: Document,
        build: F,
    ) -> AppResult<(T, bool)>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        F: FnOnce() -> T + Send,
    {
        if let Some(existing) = collection.find_one(filter.clone()).await? {
            return Ok((existing, false));
        }

        let candidate = build();
        match collection.insert_one(&candidate).await {
            Ok(_) => Ok((candidate, true)),
            Err(err) if is_duplicate_key(&err) => {
                let winner = collection.find_one(filter).await?.ok_or_else(|| {
                    AppError::DatabaseError(
                        "row vanished after duplicate-key insert failure".to_string(),
                    )
                })?;
                Ok((winner, false))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn substrand_ids_for_strand(&self, strand_id: &str) -> AppResult<Vec<String>> {
        let substrands = self.list_substrands(strand_id).await?;
        Ok(substrands.into_iter().map(|s| s.id).collect())
    }
}

#[async_trait]
impl CurriculumRepository for MongoCurriculumRepository {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        let cursor = self
            .subjects
            .find(doc! {})
            .with_options(Self::by_name_asc())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_grades(&self) -> AppResult<Vec<Grade>> {
        let cursor = self
            .grades
            .find(doc! {})
            .with_options(Self::by_name_asc())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_strands(&self, subject_id: &str, grade_id: &str) -> AppResult<Vec<Strand>> {
        let cursor = self
            .strands
            .find(doc! { "subject_id": subject_id, "grade_id": grade_id })
            .with_options(Self::by_name_asc())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_all_strands(&self) -> AppResult<Vec<Strand>> {
        let cursor = self
            .strands
            .find(doc! {})
            .with_options(Self::by_name_asc())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_substrands(&self, strand_id: &str) -> AppResult<Vec<SubStrand>> {
        let cursor = self
            .substrands
            .find(doc! { "strand_id": strand_id })
            .with_options(Self::by_name_asc())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_learning_outcomes(&self, substrand_id: &str) -> AppResult<Vec<LearningOutcome>> {
        let cursor = self
            .learning_outcomes
            .find(doc! { "substrand_id": substrand_id })
            .with_options(Self::by_insertion_order())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_outcomes_for_strand(&self, strand_id: &str) -> AppResult<Vec<LearningOutcome>> {
        let substrand_ids = self.substrand_ids_for_strand(strand_id).await?;
        if substrand_ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .learning_outcomes
            .find(doc! { "substrand_id": { "$in": substrand_ids } })
            .with_options(Self::by_insertion_order())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<Subject>> {
        Ok(self.subjects.find_one(doc! { "id": id }).await?)
    }

    async fn find_grade(&self, id: &str) -> AppResult<Option<Grade>> {
        Ok(self.grades.find_one(doc! { "id": id }).await?)
    }

    async fn find_strand(&self, id: &str) -> AppResult<Option<Strand>> {
        Ok(self.strands.find_one(doc! { "id": id }).await?)
    }

    async fn find_substrand(&self, id: &str) -> AppResult<Option<SubStrand>> {
        Ok(self.substrands.find_one(doc! { "id": id }).await?)
    }

    async fn find_learning_outcome(&self, id: &str) -> AppResult<Option<LearningOutcome>> {
        Ok(self.learning_outcomes.find_one(doc! { "id": id }).await?)
    }

    async fn find_or_create_subject(&self, name: &str) -> AppResult<(Subject, bool)> {
        Self::find_or_create(&self.subjects, doc! { "name": name }, || Subject::new(name)).await
    }

    async fn find_or_create_grade(&self, name: &str) -> AppResult<(Grade, bool)> {
        Self::find_or_create(&self.grades, doc! { "name": name }, || Grade::new(name)).await
    }

    async fn find_or_create_strand(
        &self,
        subject_id: &str,
        grade_id: &str,
        name: &str,
    ) -> AppResult<(Strand, bool)> {
        Self::find_or_create(
            &self.strands,
            doc! { "subject_id": subject_id, "grade_id": grade_id, "name": name },
            || Strand::new(name, subject_id, grade_id),
        )
        .await
    }

    async fn find_or_create_substrand(
        &self,
        strand_id: &str,
        name: &str,
    ) -> AppResult<(SubStrand, bool)> {
        Self::find_or_create(
            &self.substrands,
            doc! { "strand_id": strand_id, "name": name },
            || SubStrand::new(name, strand_id),
        )
        .await
    }

    async fn find_or_create_learning_outcome(
        &self,
        substrand_id: &str,
        description: &str,
    ) -> AppResult<(LearningOutcome, bool)> {
        Self::find_or_create(
            &self.learning_outcomes,
            doc! { "substrand_id": substrand_id, "description": description },
            || LearningOutcome::new(description, substrand_id),
        )
        .await
    }

    async fn find_or_create_key_inquiry_question(
        &self,
        substrand_id: &str,
        question_text: &str,
    ) -> AppResult<(KeyInquiryQuestion, bool)> {
        Self::find_or_create(
            &self.key_inquiry_questions,
            doc! { "substrand_id": substrand_id, "question_text": question_text },
            || KeyInquiryQuestion::new(question_text, substrand_id),
        )
        .await
    }

    async fn delete_subject(&self, id: &str) -> AppResult<()> {
        let cursor = self.strands.find(doc! { "subject_id": id }).await?;
        let strands: Vec<Strand> = cursor.try_collect().await?;
        for strand in &strands {
            self.delete_strand(&strand.id).await?;
        }

        self.subjects.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn delete_grade(&self, id: &str) -> AppResult<()> {
        let cursor = self.strands.find(doc! { "grade_id": id }).await?;
        let strands: Vec<Strand> = cursor.try_collect().await?;
        for strand in &strands {
            self.delete_strand(&strand.id).await?;
        }

        self.grades.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn delete_strand(&self, id: &str) -> AppResult<()> {
        let substrand_ids = self.substrand_ids_for_strand(id).await?;
        if !substrand_ids.is_empty() {
            self.learning_outcomes
                .delete_many(doc! { "substrand_id": { "$in": substrand_ids.clone() } })
                .await?;
            self.key_inquiry_questions
                .delete_many(doc! { "substrand_id": { "$in": substrand_ids } })
                .await?;
        }

        self.substrands
            .delete_many(doc! { "strand_id": id })
            .await?;
        self.strands.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn delete_substrand(&self, id: &str) -> AppResult<()> {
        self.learning_outcomes
            .delete_many(doc! { "substrand_id": id })
            .await?;
        self.key_inquiry_questions
            .delete_many(doc! { "substrand_id": id })
            .await?;
        self.substrands.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        self.subjects
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        self.grades
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        self.strands
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "subject_id": 1, "grade_id": 1, "name": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        self.substrands
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "strand_id": 1, "name": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        // Leaf items carry no unique index; their uniqueness is enforced by
        // the importer's find-or-create path. Plain indexes support the
        // substrand_id lookups.
        self.learning_outcomes
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "substrand_id": 1 })
                    .build(),
            )
            .await?;

        self.key_inquiry_questions
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "substrand_id": 1 })
                    .build(),
            )
            .await?;

        log::info!("Ensured curriculum collection indexes");

        Ok(())
    }
}
