pub mod assessment_service;
pub mod grading;
pub mod questionnaire;
pub mod student_service;

pub use assessment_service::AssessmentService;
pub use student_service::StudentService;
