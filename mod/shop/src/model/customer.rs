use serde::{Deserialize, Serialize};

/// Customer — a person waiting for robots, identified by email.
/// Append-only: customers are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Generated ID — primary key.
    pub id: String,

    /// Email address — unique, format-validated at creation.
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain
/// with non-empty labels, no whitespace. `localhost` is the one
/// accepted dotless domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if domain == "localhost" {
        return true;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
