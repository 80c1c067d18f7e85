use crate::models::domain::{
    questionnaire::{FieldType, Questionnaire, QuestionnaireField},
    quiz::{AnswerOption, Quiz, QuizQuestion},
    Lesson,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A small valid quiz: three required one-point questions, pass at 60%.
    pub fn sample_quiz() -> Quiz {
        let questions = (0..3)
            .map(|i| QuizQuestion {
                question: format!("Sample question {}", i),
                answer_options: vec![
                    AnswerOption {
                        text: "Correct".to_string(),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: "Incorrect".to_string(),
                        is_correct: false,
                    },
                ],
                explanation: Some(format!("Explanation {}", i)),
                points: 1,
                required: true,
            })
            .collect();

        Quiz {
            title: Some("Sample quiz".to_string()),
            description: Some("Used across tests".to_string()),
            shuffle_questions: false,
            pass_score: Some(60),
            questions,
        }
    }

    /// A questionnaire with one required text field and one optional choice.
    pub fn sample_questionnaire() -> Questionnaire {
        Questionnaire {
            title: Some("Sample questionnaire".to_string()),
            description: None,
            fields: vec![
                QuestionnaireField {
                    label: "Your feedback".to_string(),
                    name: "feedback".to_string(),
                    field_type: FieldType::LongText,
                    options: vec![],
                    required: true,
                    placeholder: None,
                    help_text: None,
                },
                QuestionnaireField {
                    label: "Favorite topics".to_string(),
                    name: "topics".to_string(),
                    field_type: FieldType::MultipleChoice,
                    options: vec!["Ownership".to_string(), "Traits".to_string()],
                    required: false,
                    placeholder: None,
                    help_text: None,
                },
            ],
        }
    }

    pub fn lesson_with_assessments(id: &str) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: format!("Lesson {}", id),
            quiz: Some(sample_quiz()),
            questionnaire: Some(sample_questionnaire()),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}
