use serde::{Deserialize, Serialize};

/// Closed set of question kinds the prompt builder knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    TrueFalse,
    FillInTheBlank,
}

impl QuestionType {
    /// Case-insensitive parse; "mcq" is an accepted alias for multiple_choice.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "mcq" | "multiple_choice" => Some(QuestionType::MultipleChoice),
            "short_answer" => Some(QuestionType::ShortAnswer),
            "true_false" => Some(QuestionType::TrueFalse),
            "fill_in_the_blank" => Some(QuestionType::FillInTheBlank),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::TrueFalse => "true_false",
            QuestionType::FillInTheBlank => "fill_in_the_blank",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level shape required from the model in full-test mode. Question
/// objects inside sections are passed through without deep validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub test_title: String,
    pub sections: Vec<TestSection>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestSection {
    pub section_title: String,
    pub questions: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_aliases_and_any_case() {
        assert_eq!(QuestionType::parse("mcq"), Some(QuestionType::MultipleChoice));
        assert_eq!(
            QuestionType::parse("Multiple_Choice"),
            Some(QuestionType::MultipleChoice)
        );
        assert_eq!(
            QuestionType::parse("  SHORT_ANSWER  "),
            Some(QuestionType::ShortAnswer)
        );
        assert_eq!(QuestionType::parse("true_false"), Some(QuestionType::TrueFalse));
        assert_eq!(
            QuestionType::parse("fill_in_the_blank"),
            Some(QuestionType::FillInTheBlank)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_kinds() {
        assert_eq!(QuestionType::parse("essay"), None);
        assert_eq!(QuestionType::parse(""), None);
        assert_eq!(QuestionType::parse("multiple choice"), None);
    }

    #[test]
    fn test_as_str_round_trip() {
        for kind in [
            QuestionType::MultipleChoice,
            QuestionType::ShortAnswer,
            QuestionType::TrueFalse,
            QuestionType::FillInTheBlank,
        ] {
            assert_eq!(QuestionType::parse(kind.as_str()), Some(kind));
        }
    }
}
