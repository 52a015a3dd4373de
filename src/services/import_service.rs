//! Idempotent curriculum importer. Each CSV row names a full path through the
//! hierarchy plus one leaf item; every level is resolved with find-or-create,
//! so re-running an import creates nothing new.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    repositories::CurriculumRepository,
};

pub const REQUIRED_COLUMNS: [&str; 6] =
    ["Subject", "Grade", "Strand", "SubStrand", "ItemType", "ItemText"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Grade")]
    grade: String,
    #[serde(rename = "Strand")]
    strand: String,
    #[serde(rename = "SubStrand")]
    substrand: String,
    #[serde(rename = "ItemType")]
    item_type: String,
    #[serde(rename = "ItemText")]
    item_text: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CreatedCounts {
    pub subjects: u64,
    pub grades: u64,
    pub strands: u64,
    pub substrands: u64,
    pub learning_outcomes: u64,
    pub key_inquiry_questions: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub processed: u64,
    pub errors: u64,
    pub created: CreatedCounts,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Import Summary ---")?;
        writeln!(f, "Total rows processed: {}", self.processed)?;
        writeln!(f, "Errors encountered: {}", self.errors)?;
        writeln!(f, "New items created:")?;
        writeln!(f, "- Subject: {}", self.created.subjects)?;
        writeln!(f, "- Grade: {}", self.created.grades)?;
        writeln!(f, "- Strand: {}", self.created.strands)?;
        writeln!(f, "- SubStrand: {}", self.created.substrands)?;
        writeln!(f, "- LearningOutcome: {}", self.created.learning_outcomes)?;
        writeln!(
            f,
            "- KeyInquiryQuestion: {}",
            self.created.key_inquiry_questions
        )?;
        write!(f, "----------------------")
    }
}

pub struct ImportService {
    repository: Arc<dyn CurriculumRepository>,
}

impl ImportService {
    pub fn new(repository: Arc<dyn CurriculumRepository>) -> Self {
        Self { repository }
    }

    /// Imports one CSV file. A missing file or missing header aborts the
    /// import; a bad row is counted and logged, and the import continues.
    pub async fn import_file(&self, path: &Path) -> AppResult<ImportSummary> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::ValidationError(format!("Cannot open CSV file {}: {}", path.display(), e))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| AppError::ValidationError(format!("Cannot read CSV headers: {}", e)))?
            .clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "CSV file missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut summary = ImportSummary::default();

        for record in reader.deserialize::<CsvRow>() {
            summary.processed += 1;

            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    log::error!("Error parsing row {}: {}", summary.processed, e);
                    summary.errors += 1;
                    continue;
                }
            };

            if let Err(e) = self.import_row(&row, &mut summary.created).await {
                log::error!(
                    "Error processing row {}: {} (row data: {:?})",
                    summary.processed,
                    e,
                    row
                );
                summary.errors += 1;
            }
        }

        Ok(summary)
    }

    async fn import_row(&self, row: &CsvRow, created: &mut CreatedCounts) -> AppResult<()> {
        let subject_name = row.subject.trim();
        let grade_name = row.grade.trim();
        let strand_name = row.strand.trim();
        let substrand_name = row.substrand.trim();
        let item_type = row.item_type.trim();
        let item_text = row.item_text.trim();

        if [
            subject_name,
            grade_name,
            strand_name,
            substrand_name,
            item_type,
            item_text,
        ]
        .iter()
        .any(|field| field.is_empty())
        {
            return Err(AppError::ValidationError(
                "Missing data in one or more required fields".to_string(),
            ));
        }

        let (subject, was_created) = self.repository.find_or_create_subject(subject_name).await?;
        if was_created {
            created.subjects += 1;
        }

        let (grade, was_created) = self.repository.find_or_create_grade(grade_name).await?;
        if was_created {
            created.grades += 1;
        }

        let (strand, was_created) = self
            .repository
            .find_or_create_strand(&subject.id, &grade.id, strand_name)
            .await?;
        if was_created {
            created.strands += 1;
        }

        let (substrand, was_created) = self
            .repository
            .find_or_create_substrand(&strand.id, substrand_name)
            .await?;
        if was_created {
            created.substrands += 1;
        }

        match item_type {
            "LearningOutcome" => {
                let (_, was_created) = self
                    .repository
                    .find_or_create_learning_outcome(&substrand.id, item_text)
                    .await?;
                if was_created {
                    created.learning_outcomes += 1;
                }
            }
            "KeyInquiryQuestion" => {
                let (_, was_created) = self
                    .repository
                    .find_or_create_key_inquiry_question(&substrand.id, item_text)
                    .await?;
                if was_created {
                    created.key_inquiry_questions += 1;
                }
            }
            other => {
                return Err(AppError::ValidationError(format!(
                    "Invalid ItemType '{}'. Must be 'LearningOutcome' or 'KeyInquiryQuestion'",
                    other
                )));
            }
        }

        Ok(())
    }
}
