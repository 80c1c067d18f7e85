use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted record of one questionnaire submission, flattened to
/// field/value pairs. Responses are written once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionnaireResponse {
    pub id: String,
    pub student_id: String,
    pub lesson_id: String,
    pub submitted_at: DateTime<Utc>,
    pub responses: Vec<ResponseEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One submitted field. String inputs are stored verbatim; everything else
/// is stored as its JSON serialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseEntry {
    pub field_name: String,
    pub value: String,
}

impl QuestionnaireResponse {
    pub fn new(student_id: String, lesson_id: String, responses: Vec<ResponseEntry>) -> Self {
        QuestionnaireResponse {
            id: Uuid::new_v4().to_string(),
            student_id,
            lesson_id,
            submitted_at: Utc::now(),
            responses,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_round_trip_preserves_entries() {
        let response = QuestionnaireResponse::new(
            "student-1".to_string(),
            "lesson-1".to_string(),
            vec![
                ResponseEntry {
                    field_name: "feedback".to_string(),
                    value: "Great lesson".to_string(),
                },
                ResponseEntry {
                    field_name: "topics".to_string(),
                    value: "[\"ownership\",\"borrowing\"]".to_string(),
                },
            ],
        );

        let json = serde_json::to_string(&response).expect("response should serialize");
        let parsed: QuestionnaireResponse =
            serde_json::from_str(&json).expect("response should deserialize");

        assert_eq!(parsed.responses.len(), 2);
        assert_eq!(parsed.responses[0].field_name, "feedback");
        assert_eq!(parsed.responses[1].value, "[\"ownership\",\"borrowing\"]");
    }
}
