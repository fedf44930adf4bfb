//! Token verification service.

mod auth_service;

pub use auth_service::{Authenticator, Claims, TokenVerifier, HMAC_ALGORITHMS};
