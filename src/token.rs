use crate::error::ScrapeError;

/// Issues the session token returned alongside every scrape response.
///
/// Authentication lives upstream; implementations only mint a fresh token
/// for an already authenticated user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &str) -> Result<String, ScrapeError>;
}

/// Mints random opaque bearer tokens prefixed with the user id.
#[derive(Debug, Default, Clone)]
pub struct OpaqueTokenIssuer;

impl TokenIssuer for OpaqueTokenIssuer {
    fn issue(&self, user_id: &str) -> Result<String, ScrapeError> {
        if user_id.is_empty() {
            return Err(ScrapeError::Token("empty user id".to_string()));
        }
        Ok(format!("{}.{}", user_id, uuid::Uuid::new_v4().simple()))
    }
}
