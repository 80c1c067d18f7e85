use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted record of one quiz submission. Attempts are written once and
/// never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub student_id: String,
    pub lesson_id: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AttemptAnswer>,
    pub score_percent: i32,
    pub score_points: i32,
    pub total_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptAnswer {
    pub question_index: i32,
    /// -1 when an optional question was left unanswered.
    pub selected_option_index: i32,
    pub is_correct: bool,
}

impl QuizAttempt {
    pub fn new(
        student_id: String,
        lesson_id: String,
        answers: Vec<AttemptAnswer>,
        score_percent: i32,
        score_points: i32,
        total_points: i32,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            student_id,
            lesson_id,
            submitted_at: Utc::now(),
            answers,
            score_percent,
            score_points,
            total_points,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_attempt(score_points: i32, total_points: i32, score_percent: i32) -> QuizAttempt {
        QuizAttempt::new(
            "student-1".to_string(),
            "lesson-1".to_string(),
            vec![
                AttemptAnswer {
                    question_index: 0,
                    selected_option_index: 1,
                    is_correct: true,
                },
                AttemptAnswer {
                    question_index: 1,
                    selected_option_index: -1,
                    is_correct: false,
                },
            ],
            score_percent,
            score_points,
            total_points,
        )
    }

    #[test]
    fn attempt_round_trip_preserves_score_fields() {
        let attempt = make_attempt(2, 3, 67);

        let json = serde_json::to_string(&attempt).expect("attempt should serialize");
        let parsed: QuizAttempt = serde_json::from_str(&json).expect("attempt should deserialize");

        assert_eq!(parsed.score_points, 2);
        assert_eq!(parsed.total_points, 3);
        assert_eq!(parsed.score_percent, 67);
        assert_eq!(parsed.answers.len(), 2);
    }

    #[test]
    fn unanswered_question_is_recorded_with_sentinel_index() {
        let attempt = make_attempt(1, 2, 50);

        assert_eq!(attempt.answers[1].selected_option_index, -1);
        assert!(!attempt.answers[1].is_correct);
    }

    #[test]
    fn each_attempt_gets_a_fresh_id() {
        let a = make_attempt(1, 1, 100);
        let b = make_attempt(1, 1, 100);

        assert_ne!(a.id, b.id);
    }
}
