use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_points() -> i32 {
    1
}

fn default_required() -> bool {
    true
}

/// A scored set of multiple-choice questions, authored in the content store
/// and embedded in a lesson document.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct Quiz {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub shuffle_questions: bool,
    /// Minimum percentage needed to pass, when configured.
    #[validate(range(min = 0, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_score: Option<i32>,
    #[validate(
        length(min = 1, message = "a quiz needs at least one question"),
        nested
    )]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct QuizQuestion {
    #[validate(length(min = 5, message = "question text is too short"))]
    pub question: String,
    #[validate(
        length(min = 2, message = "a question needs at least two answer options"),
        nested
    )]
    pub answer_options: Vec<AnswerOption>,
    /// Shown after answering to explain the correct answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default = "default_points")]
    pub points: i32,
    #[serde(default = "default_required")]
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct AnswerOption {
    #[validate(length(min = 1))]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl Quiz {
    /// Sum of every question's points, the denominator of the score.
    pub fn total_points(&self) -> i32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}
