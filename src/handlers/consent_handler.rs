use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::MaybeAuthenticatedUser,
    errors::AppError,
    handlers::auth_handler::issue_token_pair,
    models::dto::{
        request::ConsentRequest,
        response::{AuthResponse, ConsentStatusResponse, ConsentTokenResponse},
    },
};

/// Record consent. For a signed-in student this stores consent on their
/// record and returns a fresh token pair whose claims carry it; for a
/// visitor it returns the short-lived pre-signup consent token that unlocks
/// registration.
#[post("/consent")]
pub async fn grant_consent(
    state: web::Data<AppState>,
    auth: MaybeAuthenticatedUser,
    request: web::Json<ConsentRequest>,
) -> Result<HttpResponse, AppError> {
    if !request.accepted {
        return Err(AppError::ValidationError(
            "Consent requires an explicit acceptance".to_string(),
        ));
    }

    match auth.0 {
        Some(claims) => {
            let student = state.student_service.record_consent(&claims.sub).await?;

            // Outstanding sessions keep their old claims until rotated, so
            // the stale refresh tokens are cut off and a fresh pair issued.
            state
                .refresh_tokens
                .revoke_all_for_student(&student.subject())
                .await?;
            let (token, refresh_token) = issue_token_pair(&state, &student).await?;

            log::info!("Recorded consent for student {}", student.username);

            Ok(HttpResponse::Ok().json(AuthResponse {
                token,
                refresh_token,
                username: student.username,
                email: student.email,
                consent_given: true,
            }))
        }
        None => {
            let consent_token = state.jwt_service.create_consent_token()?;
            Ok(HttpResponse::Ok().json(ConsentTokenResponse {
                consent_token,
                expires_in_minutes: state.jwt_service.consent_token_ttl_minutes(),
            }))
        }
    }
}

#[get("/consent")]
pub async fn consent_status(
    state: web::Data<AppState>,
    auth: MaybeAuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    match auth.0 {
        Some(claims) => {
            let student = state.student_service.get_by_auth_id(&claims.sub).await?;
            Ok(HttpResponse::Ok().json(ConsentStatusResponse {
                consent_given: student.consent_given,
                consented_at: student.consented_at,
            }))
        }
        None => Ok(HttpResponse::Ok().json(ConsentStatusResponse {
            consent_given: false,
            consented_at: None,
        })),
    }
}
