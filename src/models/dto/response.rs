use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    questionnaire::{Questionnaire, QuestionnaireField},
    quiz::{Quiz, QuizQuestion},
    quiz_attempt::QuizAttempt,
    student::Student,
};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
    pub consent_given: bool,
}

#[derive(Debug, Serialize)]
pub struct ConsentTokenResponse {
    pub consent_token: String,
    pub expires_in_minutes: i64,
}

#[derive(Debug, Serialize)]
pub struct ConsentStatusResponse {
    pub consent_given: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consented_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub consent_given: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consented_at: Option<DateTime<Utc>>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        StudentResponse {
            id: student.subject(),
            username: student.username,
            email: student.email,
            display_name: student.display_name,
            consent_given: student.consent_given,
            consented_at: student.consented_at,
        }
    }
}

/// Client-facing rendering of a lesson's assessments. Grading data
/// (correct flags, explanations) is stripped until an attempt comes back.
#[derive(Debug, Serialize)]
pub struct LessonAssessmentsResponse {
    pub lesson_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<QuestionnaireView>,
}

#[derive(Debug, Serialize)]
pub struct QuizView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_score: Option<i32>,
    pub questions: Vec<QuizQuestionView>,
}

#[derive(Debug, Serialize)]
pub struct QuizQuestionView {
    /// The question's authored position; submissions answer by this index,
    /// so shuffled presentation stays positionally stable.
    pub index: i32,
    pub question: String,
    pub answer_options: Vec<String>,
    pub points: i32,
    pub required: bool,
}

impl QuizQuestionView {
    pub fn from_question(index: usize, question: &QuizQuestion) -> Self {
        QuizQuestionView {
            index: index as i32,
            question: question.question.clone(),
            answer_options: question
                .answer_options
                .iter()
                .map(|opt| opt.text.clone())
                .collect(),
            points: question.points,
            required: question.required,
        }
    }
}

impl QuizView {
    /// Questions keep their authored order here; the caller shuffles when
    /// the quiz asks for it.
    pub fn from_quiz(quiz: &Quiz) -> Self {
        QuizView {
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            pass_score: quiz.pass_score,
            questions: quiz
                .questions
                .iter()
                .enumerate()
                .map(|(index, question)| QuizQuestionView::from_question(index, question))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<QuestionnaireField>,
}

impl From<&Questionnaire> for QuestionnaireView {
    fn from(questionnaire: &Questionnaire) -> Self {
        QuestionnaireView {
            title: questionnaire.title.clone(),
            description: questionnaire.description.clone(),
            fields: questionnaire.fields.clone(),
        }
    }
}

/// The graded outcome returned right after a quiz submission.
#[derive(Debug, Serialize)]
pub struct QuizAttemptResult {
    pub attempt_id: String,
    pub submitted_at: DateTime<Utc>,
    pub score_points: i32,
    pub total_points: i32,
    pub score_percent: i32,
    /// Present only when the quiz configures a pass score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    pub questions: Vec<QuestionResultView>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResultView {
    pub question_index: i32,
    pub selected_option_index: i32,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizAttemptResult {
    pub fn from_attempt(quiz: &Quiz, attempt: &QuizAttempt) -> Self {
        let questions = attempt
            .answers
            .iter()
            .map(|answer| QuestionResultView {
                question_index: answer.question_index,
                selected_option_index: answer.selected_option_index,
                is_correct: answer.is_correct,
                explanation: quiz
                    .questions
                    .get(answer.question_index as usize)
                    .and_then(|q| q.explanation.clone()),
            })
            .collect();

        QuizAttemptResult {
            attempt_id: attempt.id.clone(),
            submitted_at: attempt.submitted_at,
            score_points: attempt.score_points,
            total_points: attempt.total_points,
            score_percent: attempt.score_percent,
            passed: quiz.pass_score.map(|p| attempt.score_percent >= p),
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireReceipt {
    pub response_id: String,
    pub submitted_at: DateTime<Utc>,
    pub recorded_fields: usize,
}

#[derive(Debug, Serialize)]
pub struct AttemptSummary {
    pub id: String,
    pub lesson_id: String,
    pub submitted_at: DateTime<Utc>,
    pub score_percent: i32,
    pub score_points: i32,
    pub total_points: i32,
}

impl From<QuizAttempt> for AttemptSummary {
    fn from(attempt: QuizAttempt) -> Self {
        AttemptSummary {
            id: attempt.id,
            lesson_id: attempt.lesson_id,
            submitted_at: attempt.submitted_at,
            score_percent: attempt.score_percent,
            score_points: attempt.score_points,
            total_points: attempt.total_points,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttemptListResponse {
    pub attempts: Vec<AttemptSummary>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz::AnswerOption;

    fn sample_quiz() -> Quiz {
        Quiz {
            title: Some("Basics".to_string()),
            description: None,
            shuffle_questions: false,
            pass_score: Some(50),
            questions: vec![QuizQuestion {
                question: "Which option is right?".to_string(),
                answer_options: vec![
                    AnswerOption {
                        text: "Right".to_string(),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: "Wrong".to_string(),
                        is_correct: false,
                    },
                ],
                explanation: Some("The first one.".to_string()),
                points: 1,
                required: true,
            }],
        }
    }

    #[test]
    fn quiz_view_strips_grading_data() {
        let view = QuizView::from_quiz(&sample_quiz());

        let json = serde_json::to_string(&view).expect("view should serialize");
        assert!(!json.contains("is_correct"));
        assert!(!json.contains("explanation"));
        assert_eq!(view.questions[0].answer_options, vec!["Right", "Wrong"]);
    }

    #[test]
    fn attempt_result_carries_explanation_and_pass_verdict() {
        let quiz = sample_quiz();
        let attempt = QuizAttempt::new(
            "student-1".to_string(),
            "lesson-1".to_string(),
            vec![crate::models::domain::quiz_attempt::AttemptAnswer {
                question_index: 0,
                selected_option_index: 0,
                is_correct: true,
            }],
            100,
            1,
            1,
        );

        let result = QuizAttemptResult::from_attempt(&quiz, &attempt);

        assert_eq!(result.passed, Some(true));
        assert_eq!(
            result.questions[0].explanation.as_deref(),
            Some("The first one.")
        );
    }
}
