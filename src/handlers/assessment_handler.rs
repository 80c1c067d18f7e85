use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{
        AttemptListParams, SubmitQuestionnaireResponseRequest, SubmitQuizAttemptRequest,
    },
};

#[get("/lessons/{id}/assessments")]
pub async fn lesson_assessments(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.assessment_service.lesson_assessments(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/lessons/{id}/quiz-attempts")]
pub async fn submit_quiz_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizAttemptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .assessment_service
        .submit_quiz_attempt(&auth.0.sub, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[post("/lessons/{id}/questionnaire-responses")]
pub async fn submit_questionnaire_response(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuestionnaireResponseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let receipt = state
        .assessment_service
        .submit_questionnaire_response(&auth.0.sub, &id, &request.values)
        .await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[get("/students/me/quiz-attempts")]
pub async fn my_quiz_attempts(
    state: web::Data<AppState>,
    query: web::Query<AttemptListParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let response = state
        .assessment_service
        .student_attempts(
            &auth.0.sub,
            params.lesson_id.as_deref(),
            params.offset(),
            params.limit(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
