use actix_web::{get, post, web, HttpResponse};
use chrono::{Duration, Utc};
use octocrab::Octocrab;
use secrecy::ExposeSecret as _;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::{
        domain::{refresh_token::hash_token, RefreshToken, Student},
        dto::{request::RefreshTokenRequest, response::AuthResponse},
    },
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: String,
    #[serde(default)]
    redirect_uri: Option<String>,
    /// Pre-signup consent token; required the first time an identity
    /// signs in, ignored afterwards.
    #[serde(default)]
    consent_token: Option<String>,
}

/// Sign-in/up through the identity provider. A first-time sign-in without a
/// valid pre-signup consent token is turned away, matching the consent gate
/// in front of registration.
#[get("/auth/github/callback")]
pub async fn github_callback(
    state: web::Data<AppState>,
    web::Query(params): web::Query<CallbackParams>,
) -> Result<HttpResponse, AppError> {
    let access_token = exchange_code(&state, &params).await?;

    let gh_client = Octocrab::builder()
        .user_access_token(access_token)
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build GitHub client: {}", e)))?;

    let gh_user = gh_client
        .current()
        .user()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to fetch GitHub user: {}", e)))?;

    let auth_id = gh_user.id.to_string();
    let email = gh_user
        .email
        .clone()
        .unwrap_or_else(|| format!("{}@users.noreply.github.com", gh_user.login));

    if !state.student_service.exists(&auth_id).await? {
        let consent_token = params.consent_token.as_deref().ok_or_else(|| {
            AppError::ConsentRequired("consent must be given before signing up".to_string())
        })?;
        state
            .jwt_service
            .validate_consent_token(consent_token)
            .map_err(|_| {
                AppError::ConsentRequired("consent must be given before signing up".to_string())
            })?;
    }

    let student = state
        .student_service
        .upsert_oauth_student(Student::from_oauth(
            auth_id,
            gh_user.login.clone(),
            email,
            gh_user.name.clone(),
        ))
        .await?;

    log::info!("Signed in student {}", student.username);

    let (token, refresh_token) = issue_token_pair(&state, &student).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        refresh_token,
        username: student.username,
        email: student.email,
        consent_given: student.consent_given,
    }))
}

/// Rotate a refresh token: the presented token is revoked and a fresh pair
/// is issued with the student's current consent state in the claims.
#[post("/auth/refresh")]
pub async fn refresh_session(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = request.into_inner().refresh_token;
    let claims = state.jwt_service.validate_refresh_token(&refresh_token)?;

    let hash = hash_token(&refresh_token);
    let stored = state
        .refresh_tokens
        .find_by_token_hash(&hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Refresh token not recognized".to_string()))?;

    if !stored.is_valid() {
        return Err(AppError::Unauthorized(
            "Refresh token is revoked or expired".to_string(),
        ));
    }

    state.refresh_tokens.revoke_by_token_hash(&hash).await?;

    let student = state.student_service.get_by_auth_id(&claims.sub).await?;
    let (token, new_refresh_token) = issue_token_pair(&state, &student).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        refresh_token: new_refresh_token,
        username: student.username,
        email: student.email,
        consent_given: student.consent_given,
    }))
}

#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let hash = hash_token(&request.refresh_token);

    match state.refresh_tokens.revoke_by_token_hash(&hash).await {
        Ok(()) | Err(AppError::NotFound(_)) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Err(e),
    }
}

/// Issue an access + refresh token pair and persist the refresh token's
/// hash for later rotation checks.
pub(crate) async fn issue_token_pair(
    state: &AppState,
    student: &Student,
) -> AppResult<(String, String)> {
    let token = state.jwt_service.create_token(student)?;
    let refresh_token = state.jwt_service.create_refresh_token(&student.auth_id)?;

    let expires_at = Utc::now() + Duration::hours(state.jwt_service.refresh_expiration_hours());
    state
        .refresh_tokens
        .create(RefreshToken::new(
            student.subject(),
            hash_token(&refresh_token),
            expires_at,
        ))
        .await?;

    Ok((token, refresh_token))
}

async fn exchange_code(state: &AppState, params: &CallbackParams) -> AppResult<String> {
    let client_id = &state.config.gh_client_id;
    let client_secret = state.config.gh_client_secret.expose_secret();

    // The redirect_uri must match the one used in the initial authorization
    // request; the frontend's callback route is the default.
    let default_redirect = format!("{}/auth/callback", state.config.frontend_origin);
    let redirect_uri = params.redirect_uri.as_deref().unwrap_or(&default_redirect);

    let response = reqwest::Client::new()
        .post("https://github.com/login/oauth/access_token")
        .header("accept", "application/json")
        .form(&[
            ("code", params.code.as_str()),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to exchange OAuth code: {}", e)))?;

    let oauth: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to parse token response: {}", e)))?;

    if let Some(error) = oauth.get("error").and_then(|v| v.as_str()) {
        let description = oauth
            .get("error_description")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        log::error!("GitHub OAuth error: {} - {}", error, description);
        return Err(AppError::Unauthorized(format!(
            "GitHub OAuth error: {}",
            error
        )));
    }

    oauth
        .get("access_token")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::InternalError("No access_token in GitHub response".to_string()))
}
