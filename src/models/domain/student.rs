use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A platform student, created on first sign-in through the identity
/// provider and keyed by the provider's stable id.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Student {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub auth_id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub consent_given: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consented_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn from_oauth(
        auth_id: String,
        username: String,
        email: String,
        display_name: Option<String>,
    ) -> Self {
        Student {
            id: None,
            auth_id,
            username,
            email,
            display_name,
            consent_given: false,
            consented_at: None,
            created_at: Some(Utc::now()),
        }
    }

    /// The identifier submission documents reference: the database id once
    /// the student is persisted, the provider id otherwise.
    pub fn subject(&self) -> String {
        self.id
            .as_ref()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| self.auth_id.clone())
    }
}

#[cfg(test)]
impl Student {
    pub fn test_student(auth_id: &str) -> Self {
        Student::from_oauth(
            auth_id.to_string(),
            format!("user_{}", auth_id),
            format!("{}@example.com", auth_id),
            None,
        )
    }

    pub fn test_student_with_consent(auth_id: &str) -> Self {
        let mut student = Student::test_student(auth_id);
        student.consent_given = true;
        student.consented_at = Some(Utc::now());
        student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_student_starts_without_consent() {
        let student = Student::from_oauth(
            "gh-42".to_string(),
            "octocat".to_string(),
            "octocat@example.com".to_string(),
            Some("The Octocat".to_string()),
        );

        assert!(!student.consent_given);
        assert!(student.consented_at.is_none());
        assert!(student.created_at.is_some());
    }

    #[test]
    fn subject_falls_back_to_auth_id_before_persistence() {
        let student = Student::test_student("gh-42");
        assert_eq!(student.subject(), "gh-42");
    }

    #[test]
    fn subject_prefers_database_id() {
        let mut student = Student::test_student("gh-42");
        let oid = ObjectId::new();
        student.id = Some(oid);

        assert_eq!(student.subject(), oid.to_hex());
    }
}
