use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A user-defined mock API definition, addressable by slug.
///
/// Fields other than `id` and `slug` carry serde defaults so that bulk
/// sync can accept minimally-shaped records (`id` + `slug` + `data`)
/// restored from a client-side cache.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MockEndpoint {
    /// Opaque identifier assigned at creation; a UUID for records this
    /// service creates, but synced records may carry any string
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    /// Structural descriptor of `data`, computed once at creation
    #[serde(default)]
    pub schema: Value,
    /// Canned response payload, freely editable after creation
    pub data: Value,
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
    #[serde(default)]
    pub settings: EndpointSettings,
}

impl MockEndpoint {
    /// Assemble a new endpoint with default settings and fresh timestamps.
    pub fn new(prompt: String, name: String, slug: String, data: Value, schema: Value) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            slug,
            name,
            prompt,
            schema,
            data,
            created_at: now,
            updated_at: now,
            settings: EndpointSettings::default(),
        }
    }

    /// Merge a partial update into this endpoint and refresh `updated_at`.
    ///
    /// `id`, `slug`, `prompt` and `schema` are immutable after creation;
    /// only `data` and `settings` can change. All-or-nothing: a
    /// rejected settings patch leaves the whole record untouched,
    /// `data` included.
    pub fn apply(&mut self, update: UpdateEndpoint) -> AppResult<()> {
        if let Some(patch) = update.settings {
            self.settings.apply(patch)?;
        }
        if let Some(data) = update.data {
            self.data = data;
        }
        self.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }
}

/// Chaos and routing configuration attached to every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointSettings {
    /// Artificial delay in milliseconds applied before responding; 0 disables
    pub latency: u64,
    /// Percentage (0-100) of requests answered with a simulated failure
    pub error_rate: u8,
    /// Which canned error is emitted when the error-rate check triggers
    pub error_type: ErrorType,
    /// HTTP verbs this endpoint answers; never empty
    pub supported_methods: Vec<HttpMethod>,
    /// Headers applied verbatim to every successful response
    pub custom_headers: HashMap<String, String>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            latency: 0,
            error_rate: 0,
            error_type: ErrorType::Internal,
            supported_methods: vec![
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Patch,
                HttpMethod::Delete,
            ],
            custom_headers: HashMap::new(),
        }
    }
}

impl EndpointSettings {
    /// Shallow-merge a settings patch: absent fields keep their current
    /// value. Rejects patches that would leave `supportedMethods` empty
    /// or put `errorRate` out of range.
    ///
    /// Validation runs over the whole patch before any field is
    /// assigned, so a rejected patch never partially applies.
    pub fn apply(&mut self, patch: SettingsPatch) -> AppResult<()> {
        if matches!(patch.error_rate, Some(rate) if rate > 100) {
            return Err(AppError::Validation(
                "errorRate must be between 0 and 100".to_string(),
            ));
        }
        if matches!(&patch.supported_methods, Some(methods) if methods.is_empty()) {
            return Err(AppError::Validation(
                "supportedMethods must not be empty".to_string(),
            ));
        }

        if let Some(rate) = patch.error_rate {
            self.error_rate = rate;
        }
        if let Some(methods) = patch.supported_methods {
            self.supported_methods = methods;
        }
        if let Some(latency) = patch.latency {
            self.latency = latency;
        }
        if let Some(error_type) = patch.error_type {
            self.error_type = error_type;
        }
        if let Some(headers) = patch.custom_headers {
            self.custom_headers = headers;
        }
        Ok(())
    }
}

/// Partial endpoint update: `data` and/or a settings patch.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEndpoint {
    pub data: Option<Value>,
    pub settings: Option<SettingsPatch>,
}

/// Partial settings update; every field optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub latency: Option<u64>,
    pub error_rate: Option<u8>,
    pub error_type: Option<ErrorType>,
    pub supported_methods: Option<Vec<HttpMethod>>,
    pub custom_headers: Option<HashMap<String, String>>,
}

/// HTTP verbs a mock endpoint can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(rename = "DELETE")]
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Map an incoming request method onto the supported verb set.
    pub fn from_method(method: &axum::http::Method) -> Option<Self> {
        match *method {
            axum::http::Method::GET => Some(HttpMethod::Get),
            axum::http::Method::POST => Some(HttpMethod::Post),
            axum::http::Method::PUT => Some(HttpMethod::Put),
            axum::http::Method::PATCH => Some(HttpMethod::Patch),
            axum::http::Method::DELETE => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    /// Whether requests with this verb carry a JSON body worth parsing.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canned error selected when chaos mode fails a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorType {
    #[serde(rename = "500")]
    Internal,
    #[serde(rename = "503")]
    Unavailable,
    #[serde(rename = "404")]
    NotFound,
    #[serde(rename = "timeout")]
    Timeout,
}
