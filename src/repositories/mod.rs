pub mod lesson_repository;
pub mod questionnaire_response_repository;
pub mod quiz_attempt_repository;
pub mod refresh_token_repository;
pub mod student_repository;

pub use lesson_repository::{LessonRepository, MongoLessonRepository};
pub use questionnaire_response_repository::{
    MongoQuestionnaireResponseRepository, QuestionnaireResponseRepository,
};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use refresh_token_repository::{MongoRefreshTokenRepository, RefreshTokenRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};
