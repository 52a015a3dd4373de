//! Fixed prompt fragments shared by the prompt builders.

/// Bloom's Taxonomy levels the prompts ask the model to mix across.
pub const TAXONOMY_LEVELS: [&str; 4] =
    ["Remembering", "Understanding", "Applying", "Analyzing"];

/// Output contract appended to single-outcome prompts. The model must answer
/// with a bare JSON list so the validator can parse it without scraping.
pub const QUESTION_LIST_CONTRACT: &str = r#"Output Format:
Respond ONLY with a valid JSON list of question objects. No extra text before or after the list.
Each question object MUST include 'type', 'question', 'taxonomy_level', and 'answer'.
For 'multiple_choice', also include 'options' (a list of 4 strings).

Example JSON Output (list of objects):
[
    {
        "type": "multiple_choice",
        "question": "Which of these is a primary color?",
        "options": ["Green", "Orange", "Blue", "Purple"],
        "answer": "Blue",
        "taxonomy_level": "Remembering"
    }
]"#;

/// Output contract appended to full-test prompts.
pub const TEST_OBJECT_CONTRACT: &str = r#"FINAL OUTPUT FORMAT:
Respond ONLY with a single, valid JSON object. Do not include any text before or after the JSON.
The JSON object should have the structure: {"test_title": "...", "sections": [{"section_title": "...", "questions": [...]}]}"#;
