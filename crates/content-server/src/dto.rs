use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use content_core::models::{Content, ContentDraft, ContentPatch, FieldInput, Page, PageRequest};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

// Fields are taken as raw JSON so a wrongly typed value reaches the validator
// and is reported under its own key.

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateContentRequest {
    /// Display title (required)
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub subtitle: Option<Value>,
    /// Thumbnail image location
    #[schema(value_type = Option<String>)]
    pub thumb: Option<Value>,
    /// Absolute URL of the original media (required)
    #[schema(value_type = Option<String>)]
    pub source: Option<Value>,
}

fn field_input(value: Value) -> Option<FieldInput> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(FieldInput::Text(text)),
        _ => Some(FieldInput::NotText),
    }
}

impl From<CreateContentRequest> for ContentDraft {
    fn from(req: CreateContentRequest) -> Self {
        Self {
            title: req.title.and_then(field_input),
            description: req.description.and_then(field_input),
            subtitle: req.subtitle.and_then(field_input),
            thumb: req.thumb.and_then(field_input),
            source: req.source.and_then(field_input),
        }
    }
}

/// Partial update. Omitted keys are left untouched; `null` clears a nullable field.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateContentRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub subtitle: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub thumb: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub source: Option<Option<Value>>,
}

/// Marks a key as present, so an explicit `null` becomes `Some(None)`
/// while a missing key stays `None` via `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateContentRequest> for ContentPatch {
    fn from(req: UpdateContentRequest) -> Self {
        let sent = |value: Option<Option<Value>>| value.map(|v| v.and_then(field_input));
        Self {
            title: sent(req.title),
            description: sent(req.description),
            subtitle: sent(req.subtitle),
            thumb: sent(req.thumb),
            source: sent(req.source),
        }
    }
}

/// Query values are parsed leniently; anything unparseable falls back to the default.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListContentsQuery {
    /// Page size (default 15, max 100)
    pub per_page: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

impl ListContentsQuery {
    pub fn page_request(&self) -> PageRequest {
        let parse = |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse().ok());
        PageRequest::new(parse(&self.per_page), parse(&self.page))
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A single content row as exposed over HTTP. Field order is part of the contract.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContentResource {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub thumb: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Content> for ContentResource {
    fn from(c: Content) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            subtitle: c.subtitle,
            thumb: c.thumb,
            source: c.source,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContentEnvelope {
    pub data: ContentResource,
}

impl From<Content> for ContentEnvelope {
    fn from(content: Content) -> Self {
        Self {
            data: content.into(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContentCollection {
    pub data: Vec<ContentResource>,
    pub links: PaginationLinks,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaginationLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub from: Option<u64>,
    pub last_page: u32,
    pub path: String,
    pub per_page: u32,
    pub to: Option<u64>,
    pub total: u64,
}

impl ContentCollection {
    /// Build the envelope for `page`, with links relative to the request `path`.
    pub fn from_page(page: Page<Content>, path: &str) -> Self {
        let link = |n: u32| format!("{path}?page={n}");
        let current = page.current_page;
        let last_page = page.last_page();

        let links = PaginationLinks {
            first: link(1),
            last: link(last_page),
            prev: (current > 1).then(|| link(current - 1)),
            next: (current < last_page).then(|| link(current + 1)),
        };
        let meta = PaginationMeta {
            current_page: current,
            from: page.from(),
            last_page,
            path: path.to_string(),
            per_page: page.per_page,
            to: page.to(),
            total: page.total,
        };

        Self {
            data: page.items.into_iter().map(ContentResource::from).collect(),
            links,
            meta,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field failure messages, present on validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}
