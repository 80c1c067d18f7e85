//! In-memory repository implementations shared by the integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use aula_server::{
    errors::{AppError, AppResult},
    models::domain::{Lesson, QuestionnaireResponse, QuizAttempt, RefreshToken, Student},
    repositories::{
        LessonRepository, QuestionnaireResponseRepository, QuizAttemptRepository,
        RefreshTokenRepository, StudentRepository,
    },
};

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: Arc<RwLock<HashMap<String, Student>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn create(&self, mut student: Student) -> AppResult<Student> {
        let mut students = self.students.write().await;
        if students.contains_key(&student.auth_id) {
            return Err(AppError::AlreadyExists(format!(
                "Student with auth id '{}' already exists",
                student.auth_id
            )));
        }

        // Emulate the database assigning an _id on insert.
        if student.id.is_none() {
            student.id = Some(ObjectId::new());
        }

        students.insert(student.auth_id.clone(), student.clone());
        Ok(student)
    }

    async fn find_by_auth_id(&self, auth_id: &str) -> AppResult<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.get(auth_id).cloned())
    }

    async fn update_by_auth_id(&self, auth_id: &str, student: Student) -> AppResult<Student> {
        let mut students = self.students.write().await;
        if !students.contains_key(auth_id) {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        students.insert(auth_id.to_string(), student.clone());
        Ok(student)
    }

    async fn set_consent(&self, auth_id: &str, consented_at: DateTime<Utc>) -> AppResult<Student> {
        let mut students = self.students.write().await;
        let student = students
            .get_mut(auth_id)
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        student.consent_given = true;
        student.consented_at = Some(consented_at);
        Ok(student.clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLessonRepository {
    lessons: Arc<RwLock<HashMap<String, Lesson>>>,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed authored content, standing in for the out-of-band content store.
    pub async fn seed(&self, lesson: Lesson) {
        let mut lessons = self.lessons.write().await;
        lessons.insert(lesson.id.clone(), lesson);
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>> {
        let lessons = self.lessons.read().await;
        Ok(lessons.get(id).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<Vec<QuizAttempt>>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.student_id == student_id && a.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    async fn count_for_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<usize> {
        Ok(self
            .find_by_student_and_lesson(student_id, lesson_id)
            .await?
            .len())
    }

    async fn get_student_attempts<'a>(
        &self,
        student_id: &str,
        lesson_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<QuizAttempt> = attempts
            .iter()
            .filter(|a| a.student_id == student_id)
            .filter(|a| lesson_id.map_or(true, |lid| a.lesson_id == lid))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let total = items.len() as i64;
        let start = (offset.max(0) as usize).min(items.len());
        let end = (start + limit.max(0) as usize).min(items.len());

        Ok((items[start..end].to_vec(), total))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionnaireResponseRepository {
    responses: Arc<RwLock<Vec<QuestionnaireResponse>>>,
}

impl InMemoryQuestionnaireResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<QuestionnaireResponse> {
        self.responses.read().await.clone()
    }
}

#[async_trait]
impl QuestionnaireResponseRepository for InMemoryQuestionnaireResponseRepository {
    async fn create(&self, response: QuestionnaireResponse) -> AppResult<QuestionnaireResponse> {
        let mut responses = self.responses.write().await;
        responses.push(response.clone());
        Ok(response)
    }

    async fn find_by_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<Vec<QuestionnaireResponse>> {
        let responses = self.responses.read().await;
        Ok(responses
            .iter()
            .filter(|r| r.student_id == student_id && r.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(hash).cloned())
    }

    async fn revoke_by_token_hash(&self, hash: &str) -> AppResult<()> {
        let mut tokens = self.tokens.write().await;
        let token = tokens
            .get_mut(hash)
            .ok_or_else(|| AppError::NotFound("Refresh token not found".to_string()))?;
        token.revoked = true;
        Ok(())
    }

    async fn revoke_all_for_student(&self, student_id: &str) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let mut revoked = 0;
        for token in tokens.values_mut() {
            if token.student_id == student_id && !token.revoked {
                token.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        let now = Utc::now();
        tokens.retain(|_, token| token.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
