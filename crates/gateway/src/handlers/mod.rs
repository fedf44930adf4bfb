//! HTTP handlers, one module per resource.

pub mod account_handler;
pub mod health_handler;
pub mod organization_handler;
pub mod project_handler;
pub mod user_handler;

pub use account_handler::account_routes;
pub use health_handler::health_routes;
pub use organization_handler::organization_routes;
pub use project_handler::project_routes;
pub use user_handler::user_routes;

use common::{AppError, AppResult};
use uuid::Uuid;

/// Parse a UUID path segment. A malformed id can never match a row, so it
/// is reported as not found.
pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}
