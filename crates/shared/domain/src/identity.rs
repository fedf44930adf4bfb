//! Authenticated principal.

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Email claim of the verified token
    pub email: String,
    /// Raw bearer token
    pub token: String,
}

impl Principal {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }
}
