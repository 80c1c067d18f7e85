use std::collections::HashMap;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{quiz::Quiz, quiz_attempt::AttemptAnswer},
        dto::request::QuestionAnswerInput,
    },
};

/// The graded result of one submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    pub score_points: i32,
    pub total_points: i32,
    pub score_percent: i32,
    pub answers: Vec<AttemptAnswer>,
}

/// Grade a quiz submission against the authored quiz.
///
/// Every required question must be answered or the whole submission is
/// rejected. Unanswered optional questions are recorded with a selected
/// index of -1. An answer is correct when its selected option exists and is
/// flagged correct; a selected index past the option list simply grades as
/// incorrect.
pub fn grade_quiz(quiz: &Quiz, submitted: &[QuestionAnswerInput]) -> AppResult<GradeOutcome> {
    let mut selections: HashMap<usize, Option<i32>> = HashMap::new();

    for answer in submitted {
        let index = usize::try_from(answer.question_index)
            .map_err(|_| AppError::BadRequest("Question index must not be negative".to_string()))?;

        if index >= quiz.questions.len() {
            return Err(AppError::BadRequest(format!(
                "Question index {} is out of range",
                index
            )));
        }

        if selections
            .insert(index, answer.selected_option_index)
            .is_some()
        {
            return Err(AppError::BadRequest(format!(
                "Duplicate answer for question {}",
                index
            )));
        }
    }

    let missing_required = quiz.questions.iter().enumerate().any(|(index, question)| {
        question.required && !matches!(selections.get(&index), Some(Some(_)))
    });
    if missing_required {
        return Err(AppError::ValidationError(
            "All required questions must be answered".to_string(),
        ));
    }

    let mut score_points = 0;
    let mut total_points = 0;
    let mut answers = Vec::with_capacity(quiz.questions.len());

    for (index, question) in quiz.questions.iter().enumerate() {
        let selected = selections.get(&index).copied().flatten();
        let is_correct = selected
            .and_then(|ix| question.answer_options.get(ix as usize))
            .map(|opt| opt.is_correct)
            .unwrap_or(false);

        total_points += question.points;
        if is_correct {
            score_points += question.points;
        }

        answers.push(AttemptAnswer {
            question_index: index as i32,
            selected_option_index: selected.unwrap_or(-1),
            is_correct,
        });
    }

    Ok(GradeOutcome {
        score_points,
        total_points,
        score_percent: percent(score_points, total_points),
        answers,
    })
}

/// Score as a rounded percentage; 0 when there are no points to earn.
pub fn percent(score_points: i32, total_points: i32) -> i32 {
    if total_points > 0 {
        ((score_points as f64 / total_points as f64) * 100.0).round() as i32
    } else {
        0
    }
}
