use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

/// One selected answer in a quiz submission. `question_index` refers to the
/// question's authored position, which shuffled views carry along.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionAnswerInput {
    #[validate(range(min = 0))]
    pub question_index: i32,
    /// Absent when an optional question was left unanswered.
    #[validate(range(min = 0))]
    pub selected_option_index: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizAttemptRequest {
    #[validate(nested)]
    pub answers: Vec<QuestionAnswerInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuestionnaireResponseRequest {
    /// Field name to submitted value, keyed by the authored field names.
    pub values: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConsentRequest {
    pub accepted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttemptListParams {
    #[serde(default)]
    pub lesson_id: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl AttemptListParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
