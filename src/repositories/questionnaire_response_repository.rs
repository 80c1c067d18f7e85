use async_trait::async_trait;
use futures::TryStreamExt;
#[cfg(test)]
use mockall::automock;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuestionnaireResponse};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionnaireResponseRepository: Send + Sync {
    async fn create(&self, response: QuestionnaireResponse) -> AppResult<QuestionnaireResponse>;
    async fn find_by_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<Vec<QuestionnaireResponse>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionnaireResponseRepository {
    collection: Collection<QuestionnaireResponse>,
}

impl MongoQuestionnaireResponseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questionnaire_responses");
        Self { collection }
    }
}

#[async_trait]
impl QuestionnaireResponseRepository for MongoQuestionnaireResponseRepository {
    async fn create(&self, response: QuestionnaireResponse) -> AppResult<QuestionnaireResponse> {
        self.collection.insert_one(&response).await?;
        Ok(response)
    }

    async fn find_by_student_and_lesson(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<Vec<QuestionnaireResponse>> {
        let responses = self
            .collection
            .find(doc! {
                "student_id": student_id,
                "lesson_id": lesson_id
            })
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
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

        log::info!("Created indexes for questionnaire_responses collection");
        Ok(())
    }
}
