use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Student,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, student: Student) -> AppResult<Student>;
    async fn find_by_auth_id(&self, auth_id: &str) -> AppResult<Option<Student>>;
    async fn update_by_auth_id(&self, auth_id: &str, student: Student) -> AppResult<Student>;
    async fn set_consent(&self, auth_id: &str, consented_at: DateTime<Utc>) -> AppResult<Student>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("students");
        Self { collection }
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn create(&self, student: Student) -> AppResult<Student> {
        self.collection.insert_one(&student).await?;
        self.find_by_auth_id(&student.auth_id)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError("Student missing right after insert".to_string())
            })
    }

    async fn find_by_auth_id(&self, auth_id: &str) -> AppResult<Option<Student>> {
        let student = self
            .collection
            .find_one(doc! { "auth_id": auth_id })
            .await?;
        Ok(student)
    }

    async fn update_by_auth_id(&self, auth_id: &str, student: Student) -> AppResult<Student> {
        let result = self
            .collection
            .replace_one(doc! { "auth_id": auth_id }, &student)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        Ok(student)
    }

    async fn set_consent(&self, auth_id: &str, consented_at: DateTime<Utc>) -> AppResult<Student> {
        let result = self
            .collection
            .update_one(
                doc! { "auth_id": auth_id },
                doc! { "$set": {
                    "consent_given": true,
                    "consented_at": consented_at.to_rfc3339(),
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        self.find_by_auth_id(auth_id).await?.ok_or_else(|| {
            AppError::DatabaseError("Student missing right after consent update".to_string())
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("auth_id_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "auth_id": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on students.auth_id");

        Ok(())
    }
}
