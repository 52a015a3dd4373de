//! Validation of raw model output. Strips code fences, then parses against
//! the shape the prompt contract demanded.

use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::GeneratedTest,
};

/// Removes a surrounding markdown code fence, if present, and trims
/// whitespace. Models frequently wrap JSON replies in ```json fences despite
/// the prompt contract.
pub fn clean_model_output(raw: &str) -> String {
    let trimmed = raw.trim();

    let without_prefix = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);

    let without_suffix = without_prefix
        .strip_suffix("```")
        .unwrap_or(without_prefix);

    without_suffix.trim().to_string()
}

/// Parses a single-outcome reply into a list of question objects. An empty
/// list is accepted (logged at warn), but a non-list reply is rejected.
pub fn parse_question_list(raw: &str) -> AppResult<Vec<Value>> {
    let cleaned = clean_model_output(raw);
    if cleaned.is_empty() {
        return Err(AppError::AiError("AI returned an empty response".to_string()));
    }

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        log::error!("JSON parse error: {} on text: '{}'", e, cleaned);
        AppError::AiError(format!("AI response format error (JSON): {}", e))
    })?;

    match value {
        Value::Array(questions) => {
            if questions.is_empty() {
                log::warn!("AI returned an empty JSON list");
            }
            Ok(questions)
        }
        _ => Err(AppError::AiError(
            "AI response is not a JSON list".to_string(),
        )),
    }
}

/// Parses a full-test reply into the structured test shape.
pub fn parse_generated_test(raw: &str) -> AppResult<GeneratedTest> {
    let cleaned = clean_model_output(raw);
    if cleaned.is_empty() {
        return Err(AppError::AiError("AI returned an empty response".to_string()));
    }

    serde_json::from_str(&cleaned).map_err(|e| {
        log::error!("JSON parse error: {} on text: '{}'", e, cleaned);
        AppError::AiError(format!("AI response format error (JSON): {}", e))
    })
}
