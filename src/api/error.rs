use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered 401; the client has already navigated to login.
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
