use serde::{Deserialize, Serialize};

/// Caller identified by a valid session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl AuthenticatedUser {
    /// Name shown in pages and logs
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.sub)
    }
}
