//! Deterministic prompt builders. Prompts are assembled from resolved
//! curriculum context only; nothing here talks to the database or the model.

use crate::{
    constants::prompts::{QUESTION_LIST_CONTRACT, TAXONOMY_LEVELS, TEST_OBJECT_CONTRACT},
    models::domain::{OutcomeContext, QuestionType},
};

pub const MIN_QUESTIONS: i64 = 1;
pub const MAX_QUESTIONS: i64 = 20;

/// Prompt for a batch of questions against a single learning outcome.
pub fn build_outcome_prompt(
    context: &OutcomeContext,
    num_questions: i64,
    question_type: QuestionType,
) -> String {
    format!(
        "Generate {num} unique question(s) based on the Kenyan CBC curriculum.\n\
         Question Type: {qtype}.\n\
         Context:\n\
         - Subject: {subject}\n\
         - Grade: {grade}\n\
         - Strand: {strand}\n\
         - Sub-Strand: {substrand}\n\
         - Specific Learning Outcome: \"{outcome}\"\n\
         \n\
         Instructions:\n\
         1. Strictly assess the specified Learning Outcome.\n\
         2. Ensure questions are clear, concise, and grade-appropriate for {grade}.\n\
         3. Vary the cognitive skill level of the questions according to Bloom's Taxonomy. \
         Aim for a mix of levels (e.g., {levels}).\n\
         4. For each question, indicate the targeted Bloom's Taxonomy level.\n\
         \n\
         {contract}",
        num = num_questions,
        qtype = question_type.as_str(),
        subject = context.subject,
        grade = context.grade,
        strand = context.strand,
        substrand = context.substrand,
        outcome = context.outcome_description,
        levels = TAXONOMY_LEVELS.join(", "),
        contract = QUESTION_LIST_CONTRACT,
    )
}

/// One resolved topic block of a full-test prompt.
pub struct PromptSection {
    pub index: usize,
    pub strand_name: String,
    pub num_questions: i64,
    pub outcome_descriptions: Vec<String>,
}

impl PromptSection {
    fn render(&self) -> String {
        let outcomes = self.outcome_descriptions.join("\n- ");
        format!(
            "---\n\
             **Section {index}: {strand}**\n\
             Generate {num} questions (mix of multiple_choice and short_answer) that assess \
             the following learning outcomes:\n\
             - {outcomes}\n\
             ---\n",
            index = self.index,
            strand = self.strand_name,
            num = self.num_questions,
            outcomes = outcomes,
        )
    }
}

/// Prompt for a full multi-section test paper.
pub fn build_test_prompt(subject_name: &str, grade_name: &str, sections: &[PromptSection]) -> String {
    let section_blocks: String = sections.iter().map(PromptSection::render).collect();

    format!(
        "You are an expert exam creator for the Kenyan CBC curriculum.\n\
         Create a full, well-structured {grade} {subject} test paper.\n\
         The test must have the following sections, with the specified number of questions for each.\n\
         {sections}\
         GLOBAL INSTRUCTIONS:\n\
         1. For the entire test, ensure a good mix of question types (multiple_choice, short_answer) \
         and cognitive levels based on Bloom's Taxonomy ({levels}).\n\
         2. Each generated question must be a JSON object with 'type', 'question', 'answer', and \
         'taxonomy_level'. Multiple choice questions must also have an 'options' list.\n\
         {contract}",
        grade = grade_name,
        subject = subject_name,
        sections = section_blocks,
        levels = TAXONOMY_LEVELS.join(", "),
        contract = TEST_OBJECT_CONTRACT,
    )
}
