//! Domain layer - the external resource vocabulary.
//!
//! Organizations, projects and users as they appear on the wire, with
//! kebab-case attribute names. This crate has no infrastructure
//! dependencies; storage rows and JSON:API envelopes live elsewhere.

pub mod constants;
pub mod entitlements;
pub mod error;
pub mod identity;
pub mod organization;
pub mod project;
pub mod user;

pub use constants::*;
pub use entitlements::Entitlements;
pub use error::{validate, DomainError, DomainResult};
pub use identity::Principal;
pub use organization::{Organization, OrganizationUpdate};
pub use project::Project;
pub use user::{TwoFactor, User, UserPermissions};
