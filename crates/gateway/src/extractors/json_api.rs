//! Validated JSON:API body extractor.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;
use domain::validate;

use crate::jsonapi::{Incoming, ResourceType};

/// Extracts a JSON:API request document and validates its attributes.
///
/// The `Content-Type` header is not checked; clients send both
/// `application/json` and `application/vnd.api+json`.
pub struct JsonApiBody<T>(pub Incoming<T>);

#[async_trait]
impl<S, T> FromRequest<S> for JsonApiBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + ResourceType + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let incoming = Incoming::<T>::decode(&body)?;
        validate(&incoming.attributes)?;

        Ok(JsonApiBody(incoming))
    }
}
