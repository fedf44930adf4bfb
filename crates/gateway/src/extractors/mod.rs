//! Custom request extractors.

mod json_api;

pub use json_api::JsonApiBody;
