use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, password_hash: &str) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4().to_string(),
            email: Self::normalize_email(email),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Emails are compared and stored in trimmed, lower-case form.
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        assert_eq!(
            User::normalize_email("  Teacher@Example.COM "),
            "teacher@example.com"
        );
        assert_eq!(User::normalize_email("plain@school.ke"), "plain@school.ke");
    }

    #[test]
    fn test_user_creation_normalizes_email() {
        let user = User::new(" Jane@School.KE ", "hash");
        assert_eq!(user.email, "jane@school.ke");
        assert!(!user.id.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }
}
