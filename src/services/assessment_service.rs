use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::thread_rng;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            questionnaire_response::QuestionnaireResponse, quiz_attempt::QuizAttempt,
            Lesson, Student,
        },
        dto::{
            request::SubmitQuizAttemptRequest,
            response::{
                AttemptListResponse, AttemptSummary, LessonAssessmentsResponse,
                QuestionnaireReceipt, QuestionnaireView, QuizAttemptResult, QuizView,
            },
        },
    },
    repositories::{
        LessonRepository, QuestionnaireResponseRepository, QuizAttemptRepository,
        StudentRepository,
    },
    services::{grading, questionnaire},
};

pub struct AssessmentService {
    students: Arc<dyn StudentRepository>,
    lessons: Arc<dyn LessonRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    responses: Arc<dyn QuestionnaireResponseRepository>,
}

impl AssessmentService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        lessons: Arc<dyn LessonRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        responses: Arc<dyn QuestionnaireResponseRepository>,
    ) -> Self {
        Self {
            students,
            lessons,
            attempts,
            responses,
        }
    }

    async fn lesson(&self, lesson_id: &str) -> AppResult<Lesson> {
        self.lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson '{}' not found", lesson_id)))
    }

    async fn student(&self, auth_id: &str) -> AppResult<Student> {
        self.students
            .find_by_auth_id(auth_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// The client-facing rendering of a lesson's assessments, with grading
    /// data stripped and questions shuffled when the quiz asks for it.
    pub async fn lesson_assessments(&self, lesson_id: &str) -> AppResult<LessonAssessmentsResponse> {
        let lesson = self.lesson(lesson_id).await?;

        let quiz = match &lesson.quiz {
            Some(quiz) => {
                quiz.validate()?;
                let mut view = QuizView::from_quiz(quiz);
                if quiz.shuffle_questions {
                    view.questions.shuffle(&mut thread_rng());
                }
                Some(view)
            }
            None => None,
        };

        let questionnaire = match &lesson.questionnaire {
            Some(q) => {
                q.validate()?;
                Some(QuestionnaireView::from(q))
            }
            None => None,
        };

        Ok(LessonAssessmentsResponse {
            lesson_id: lesson.id,
            title: lesson.title,
            quiz,
            questionnaire,
        })
    }

    /// Grade and persist one quiz submission. The attempt document is
    /// written once; nothing updates it afterwards.
    pub async fn submit_quiz_attempt(
        &self,
        auth_id: &str,
        lesson_id: &str,
        request: SubmitQuizAttemptRequest,
    ) -> AppResult<QuizAttemptResult> {
        request.validate()?;

        let student = self.student(auth_id).await?;
        let lesson = self.lesson(lesson_id).await?;
        let quiz = lesson
            .quiz
            .as_ref()
            .ok_or_else(|| AppError::NotFound(format!("Lesson '{}' has no quiz", lesson_id)))?;
        quiz.validate()?;

        let outcome = grading::grade_quiz(quiz, &request.answers)?;

        let attempt = QuizAttempt::new(
            student.subject(),
            lesson.id.clone(),
            outcome.answers,
            outcome.score_percent,
            outcome.score_points,
            outcome.total_points,
        );
        let attempt = self.attempts.create(attempt).await?;

        log::info!(
            "Recorded quiz attempt {} for lesson {} ({}%)",
            attempt.id,
            attempt.lesson_id,
            attempt.score_percent
        );

        Ok(QuizAttemptResult::from_attempt(quiz, &attempt))
    }

    /// Validate and persist one questionnaire submission.
    pub async fn submit_questionnaire_response(
        &self,
        auth_id: &str,
        lesson_id: &str,
        values: &HashMap<String, serde_json::Value>,
    ) -> AppResult<QuestionnaireReceipt> {
        let student = self.student(auth_id).await?;
        let lesson = self.lesson(lesson_id).await?;
        let definition = lesson.questionnaire.as_ref().ok_or_else(|| {
            AppError::NotFound(format!("Lesson '{}' has no questionnaire", lesson_id))
        })?;
        definition.validate()?;

        let entries = questionnaire::flatten_response(definition, values)?;

        let response =
            QuestionnaireResponse::new(student.subject(), lesson.id.clone(), entries);
        let response = self.responses.create(response).await?;

        log::info!(
            "Recorded questionnaire response {} for lesson {}",
            response.id,
            response.lesson_id
        );

        Ok(QuestionnaireReceipt {
            response_id: response.id,
            submitted_at: response.submitted_at,
            recorded_fields: response.responses.len(),
        })
    }

    /// The caller's own attempts, newest first.
    pub async fn student_attempts(
        &self,
        auth_id: &str,
        lesson_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<AttemptListResponse> {
        let student = self.student(auth_id).await?;

        let (attempts, total) = self
            .attempts
            .get_student_attempts(&student.subject(), lesson_id, offset, limit)
            .await?;

        Ok(AttemptListResponse {
            attempts: attempts.into_iter().map(AttemptSummary::from).collect(),
            total,
        })
    }
}
