//! Auth Service Library
//!
//! Bearer-token identity check for the gateway. Tokens are HMAC-signed
//! JWTs carrying an `email` claim; any other signing algorithm is
//! rejected.

pub mod service;

pub use service::{Authenticator, Claims, TokenVerifier, HMAC_ALGORITHMS};
