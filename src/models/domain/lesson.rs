use serde::{Deserialize, Serialize};

use crate::models::domain::{questionnaire::Questionnaire, quiz::Quiz};

/// A content-authored lesson. Lessons are created and edited out-of-band in
/// the content store; this service only reads them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Quiz>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<Questionnaire>,
}
