use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Student,
    repositories::StudentRepository,
};

pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_by_auth_id(&self, auth_id: &str) -> AppResult<Student> {
        self.repository
            .find_by_auth_id(auth_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    pub async fn exists(&self, auth_id: &str) -> AppResult<bool> {
        Ok(self.repository.find_by_auth_id(auth_id).await?.is_some())
    }

    /// Create or refresh a student from identity-provider data. Profile
    /// fields follow the provider; consent and creation time stay as the
    /// stored record has them.
    pub async fn upsert_oauth_student(&self, incoming: Student) -> AppResult<Student> {
        match self.repository.find_by_auth_id(&incoming.auth_id).await? {
            Some(existing) => {
                let auth_id = existing.auth_id.clone();
                let merged = Student {
                    id: existing.id,
                    consent_given: existing.consent_given,
                    consented_at: existing.consented_at,
                    created_at: existing.created_at,
                    ..incoming
                };
                self.repository.update_by_auth_id(&auth_id, merged).await
            }
            None => {
                log::info!("Creating student for auth id {}", incoming.auth_id);
                self.repository.create(incoming).await
            }
        }
    }

    /// Record the student's consent. Consent is given once; repeating the
    /// call keeps the original timestamp.
    pub async fn record_consent(&self, auth_id: &str) -> AppResult<Student> {
        let student = self.get_by_auth_id(auth_id).await?;
        if student.consent_given {
            return Ok(student);
        }

        self.repository.set_consent(auth_id, Utc::now()).await
    }
}
