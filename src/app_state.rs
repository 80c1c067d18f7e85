use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        LessonRepository, MongoLessonRepository, MongoQuestionnaireResponseRepository,
        MongoQuizAttemptRepository, MongoRefreshTokenRepository, MongoStudentRepository,
        QuestionnaireResponseRepository, QuizAttemptRepository, RefreshTokenRepository,
        StudentRepository,
    },
    services::{AssessmentService, StudentService},
};

#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<StudentService>,
    pub assessment_service: Arc<AssessmentService>,
    pub jwt_service: Arc<JwtService>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let student_repository = Arc::new(MongoStudentRepository::new(&db));
        student_repository.ensure_indexes().await?;

        let lesson_repository = Arc::new(MongoLessonRepository::new(&db));
        lesson_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let response_repository = Arc::new(MongoQuestionnaireResponseRepository::new(&db));
        response_repository.ensure_indexes().await?;

        let refresh_tokens: Arc<dyn RefreshTokenRepository> =
            Arc::new(MongoRefreshTokenRepository::new(&db));
        refresh_tokens.ensure_indexes().await?;

        let student_service = Arc::new(StudentService::new(student_repository.clone()));
        let assessment_service = Arc::new(AssessmentService::new(
            student_repository,
            lesson_repository,
            attempt_repository,
            response_repository,
        ));
        let jwt_service = Arc::new(JwtService::from_config(&config));

        Ok(Self {
            student_service,
            assessment_service,
            jwt_service,
            refresh_tokens,
            db,
            config: Arc::new(config),
        })
    }
}
