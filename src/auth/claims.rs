use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::Student;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The student's identity-provider id.
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Mirrors the student record's consent flag at issue time.
    pub consent: bool,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(student: &Student, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: student.auth_id.clone(),
            username: student.username.clone(),
            email: student.email.clone(),
            consent: student.consent_given,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub token_type: String, // "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl RefreshClaims {
    pub fn new(auth_id: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: auth_id.to_string(),
            token_type: "refresh".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

/// Claims of the anonymous pre-signup consent token, the API's version of
/// the short-lived consent cookie a visitor picks up before registering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentClaims {
    pub token_type: String, // "consent"
    pub exp: usize,
    pub iat: usize,
}

impl ConsentClaims {
    pub fn new(ttl_minutes: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(ttl_minutes);

        Self {
            token_type: "consent".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
