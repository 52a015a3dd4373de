use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Top level of the curriculum hierarchy, unique by name.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Subject {
            id: new_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Unique by name, sibling of Subject at the top of the hierarchy.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Grade {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Grade {
            id: new_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Unique by (subject_id, grade_id, name).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Strand {
    pub id: String,
    pub name: String,
    pub subject_id: String,
    pub grade_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Strand {
    pub fn new(name: &str, subject_id: &str, grade_id: &str) -> Self {
        let now = Utc::now();
        Strand {
            id: new_id(),
            name: name.to_string(),
            subject_id: subject_id.to_string(),
            grade_id: grade_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Unique by (strand_id, name).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SubStrand {
    pub id: String,
    pub name: String,
    pub strand_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubStrand {
    pub fn new(name: &str, strand_id: &str) -> Self {
        let now = Utc::now();
        SubStrand {
            id: new_id(),
            name: name.to_string(),
            strand_id: strand_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Leaf item. Uniqueness on (substrand_id, description) is enforced by the
/// importer's find-or-create path, not by a storage index.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearningOutcome {
    pub id: String,
    pub description: String,
    pub substrand_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LearningOutcome {
    pub fn new(description: &str, substrand_id: &str) -> Self {
        let now = Utc::now();
        LearningOutcome {
            id: new_id(),
            description: description.to_string(),
            substrand_id: substrand_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Leaf item, sibling of LearningOutcome. Same uniqueness caveat.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KeyInquiryQuestion {
    pub id: String,
    pub question_text: String,
    pub substrand_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyInquiryQuestion {
    pub fn new(question_text: &str, substrand_id: &str) -> Self {
        let now = Utc::now();
        KeyInquiryQuestion {
            id: new_id(),
            question_text: question_text.to_string(),
            substrand_id: substrand_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The fully resolved parent chain for one learning outcome, as fed to the
/// prompt builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeContext {
    pub subject: String,
    pub grade: String,
    pub strand: String,
    pub substrand: String,
    pub outcome_description: String,
}
