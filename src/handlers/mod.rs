pub mod assessment_handler;
pub mod auth_handler;
pub mod consent_handler;
pub mod health_handler;
pub mod student_handler;

pub use assessment_handler::{
    lesson_assessments, my_quiz_attempts, submit_questionnaire_response, submit_quiz_attempt,
};
pub use auth_handler::{github_callback, logout, refresh_session};
pub use consent_handler::{consent_status, grant_consent};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use student_handler::current_student;
