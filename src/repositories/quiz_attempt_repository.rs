use async_trait::async_trait;
use futures::TryStreamExt;
#[cfg(test)]
use mockall::automock;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizAttempt};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    async fn find_by_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<Vec<QuizAttempt>>;
    async fn count_for_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<usize>;
    async fn get_student_attempts<'a>(
        &self,
        student_id: &str,
        lesson_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_by_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! {
                "student_id": student_id,
                "lesson_id": lesson_id
            })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn count_for_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<usize> {
        let count = self
            .collection
            .count_documents(doc! {
                "student_id": student_id,
                "lesson_id": lesson_id
            })
            .await?;
        Ok(count as usize)
    }

    async fn get_student_attempts<'a>(
        &self,
        student_id: &str,
        lesson_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let mut filter = doc! { "student_id": student_id };

        if let Some(lid) = lesson_id {
            filter.insert("lesson_id", lid);
        }

        let total = self.collection.count_documents(filter.clone()).await?;

        let attempts = self
            .collection
            .find(filter)
            .skip(offset as u64)
            .limit(limit)
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((attempts, total as i64))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let student_lesson_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "lesson_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("student_lesson".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(student_lesson_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}
