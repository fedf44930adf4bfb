//! JSON:API document codec.
//!
//! Responses wrap resources as `{"data": ...}` with the JSON:API media type.
//! Request bodies are either a full document (`{"data": {"type", "id",
//! "attributes", "relationships"}}`) or a bare attributes object.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};

use common::{AppError, AppResult};
use domain::{
    Entitlements, Organization, OrganizationUpdate, Project, User, ENTITLEMENT_SETS_TYPE,
    JSON_API_MEDIA_TYPE, ORGANIZATIONS_TYPE, PROJECTS_TYPE, RELATIONSHIP_DEFAULT_PROJECT,
    RELATIONSHIP_ORGANIZATION, RELATIONSHIP_PROJECTS, USERS_TYPE,
};

/// JSON:API `type` accepted in request bodies for a payload type.
pub trait ResourceType {
    const TYPE: &'static str;
}

impl ResourceType for Organization {
    const TYPE: &'static str = ORGANIZATIONS_TYPE;
}

impl ResourceType for OrganizationUpdate {
    const TYPE: &'static str = ORGANIZATIONS_TYPE;
}

impl ResourceType for Project {
    const TYPE: &'static str = PROJECTS_TYPE;
}

impl ResourceType for User {
    const TYPE: &'static str = USERS_TYPE;
}

// =============================================================================
// Responses
// =============================================================================

/// Resource object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Map<String, Value>>,
}

impl Resource {
    pub fn new<T: Serialize>(
        kind: &'static str,
        id: impl Into<String>,
        attributes: &T,
    ) -> AppResult<Self> {
        let attributes =
            serde_json::to_value(attributes).map_err(|e| AppError::internal(e.to_string()))?;

        Ok(Self {
            id: id.into(),
            kind,
            attributes,
            relationships: None,
        })
    }

    /// Add a named relationship whose linkage is `data`.
    pub fn with_relationship(mut self, name: &str, data: Value) -> Self {
        self.relationships
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), json!({ "data": data }));
        self
    }
}

/// Resource identifier object.
fn identifier(kind: &str, id: impl ToString) -> Value {
    json!({ "type": kind, "id": id.to_string() })
}

/// Conversion of a domain value into its resource object.
pub trait ToResource {
    fn to_resource(&self) -> AppResult<Resource>;
}

/// Organizations are identified by name. Relationships are only rendered
/// by [`organization_detail`].
impl ToResource for Organization {
    fn to_resource(&self) -> AppResult<Resource> {
        Resource::new(ORGANIZATIONS_TYPE, self.name.clone(), self)
    }
}

/// Organization with its `default-project` and `projects` relationships.
pub fn organization_detail(organization: &Organization) -> AppResult<Resource> {
    let default_project = organization
        .default_project
        .as_ref()
        .and_then(|project| project.id)
        .map(|id| identifier(PROJECTS_TYPE, id))
        .unwrap_or(Value::Null);

    let projects = organization
        .projects
        .iter()
        .filter_map(|project| project.id)
        .map(|id| identifier(PROJECTS_TYPE, id))
        .collect();

    Ok(organization
        .to_resource()?
        .with_relationship(RELATIONSHIP_DEFAULT_PROJECT, default_project)
        .with_relationship(RELATIONSHIP_PROJECTS, Value::Array(projects)))
}

impl ToResource for Project {
    fn to_resource(&self) -> AppResult<Resource> {
        let id = self.id.map(|id| id.to_string()).unwrap_or_default();
        let resource = Resource::new(PROJECTS_TYPE, id, self)?;

        Ok(match &self.organization_name {
            Some(name) => resource
                .with_relationship(RELATIONSHIP_ORGANIZATION, identifier(ORGANIZATIONS_TYPE, name)),
            None => resource,
        })
    }
}

impl ToResource for User {
    fn to_resource(&self) -> AppResult<Resource> {
        let id = self.id.map(|id| id.to_string()).unwrap_or_default();
        Resource::new(USERS_TYPE, id, self)
    }
}

impl ToResource for Entitlements {
    fn to_resource(&self) -> AppResult<Resource> {
        Resource::new(ENTITLEMENT_SETS_TYPE, self.id.clone(), self)
    }
}

/// Primary data of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Single(Option<Resource>),
    Collection(Vec<Resource>),
}

/// Top-level response document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub data: PrimaryData,
}

impl Document {
    pub fn single(resource: Resource) -> Self {
        Self {
            data: PrimaryData::Single(Some(resource)),
        }
    }

    pub fn collection(resources: Vec<Resource>) -> Self {
        Self {
            data: PrimaryData::Collection(resources),
        }
    }

    /// `{"data": null}`
    pub fn null() -> Self {
        Self {
            data: PrimaryData::Single(None),
        }
    }

    /// Convert every item and wrap them as a collection.
    pub fn from_items<T: ToResource>(items: &[T]) -> AppResult<Self> {
        let resources = items
            .iter()
            .map(ToResource::to_resource)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self::collection(resources))
    }
}

/// JSON:API response: status plus document, served as
/// `application/vnd.api+json`.
#[derive(Debug)]
pub struct JsonApi {
    status: StatusCode,
    document: Document,
}

impl JsonApi {
    pub fn ok(document: Document) -> Self {
        Self {
            status: StatusCode::OK,
            document,
        }
    }

    pub fn created(document: Document) -> Self {
        Self {
            status: StatusCode::CREATED,
            document,
        }
    }
}

impl IntoResponse for JsonApi {
    fn into_response(self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, JSON_API_MEDIA_TYPE)],
            Json(self.document),
        )
            .into_response()
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Decoded request document.
#[derive(Debug, Clone)]
pub struct Incoming<T> {
    /// `data.id`, when supplied
    pub id: Option<String>,
    pub attributes: T,
    pub relationships: Map<String, Value>,
}

impl<T: DeserializeOwned + ResourceType> Incoming<T> {
    /// Decode a raw request body.
    pub fn decode(body: &[u8]) -> AppResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| AppError::bad_request(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> AppResult<Self> {
        let Value::Object(mut body) = value else {
            return Err(AppError::bad_request("Request body must be a JSON object"));
        };

        // Bare attributes object
        let Some(data) = body.remove("data") else {
            return Ok(Self {
                id: None,
                attributes: attributes(Value::Object(body))?,
                relationships: Map::new(),
            });
        };

        let Value::Object(mut data) = data else {
            return Err(AppError::bad_request("`data` must be a resource object"));
        };

        if let Some(kind) = data.get("type") {
            if kind.as_str() != Some(T::TYPE) {
                return Err(AppError::bad_request(format!(
                    "Resource type must be '{}'",
                    T::TYPE
                )));
            }
        }

        let id = match data.remove("id") {
            Some(Value::String(id)) => Some(id),
            _ => None,
        };
        let attrs = data
            .remove("attributes")
            .unwrap_or_else(|| Value::Object(Map::new()));
        let relationships = match data.remove("relationships") {
            Some(Value::Object(relationships)) => relationships,
            _ => Map::new(),
        };

        Ok(Self {
            id,
            attributes: attributes(attrs)?,
            relationships,
        })
    }
}

impl<T> Incoming<T> {
    /// Identifier linked by the named to-one relationship, if any.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.relationships.get(name)?.get("data")?.get("id")?.as_str()
    }
}

fn attributes<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::bad_request(e.to_string()))
}
