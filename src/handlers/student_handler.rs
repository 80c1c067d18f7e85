use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::response::StudentResponse,
};

#[get("/students/me")]
pub async fn current_student(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let student = state.student_service.get_by_auth_id(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}
