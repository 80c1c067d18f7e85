use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A stored refresh-token record. Only the SHA-256 hash of the issued token
/// is persisted, never the token itself.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub student_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    pub fn new(student_id: String, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            student_id,
            token_hash,
            expires_at,
            created_at: Utc::now(),
            revoked: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}

pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fresh_token_is_valid() {
        let token = RefreshToken::new(
            "student-1".to_string(),
            hash_token("some.jwt.token"),
            Utc::now() + Duration::hours(1),
        );

        assert!(token.is_valid());
        assert!(!token.revoked);
    }

    #[test]
    fn expired_or_revoked_token_is_invalid() {
        let mut token = RefreshToken::new(
            "student-1".to_string(),
            hash_token("some.jwt.token"),
            Utc::now() - Duration::hours(1),
        );
        assert!(!token.is_valid());

        token.expires_at = Utc::now() + Duration::hours(1);
        token.revoked = true;
        assert!(!token.is_valid());
    }

    #[test]
    fn hash_is_stable_and_hides_the_token() {
        let token = "header.payload.signature";
        let hash = hash_token(token);

        assert_eq!(hash, hash_token(token));
        assert_ne!(hash, token);
        assert_eq!(hash.len(), 64);
    }
}
