//! Transport-agnostic request descriptors
//!
//! Resource functions never talk to the network directly. They build a
//! [`RequestDescriptor`] and hand it to a [`Transport`](super::Transport),
//! which keeps request construction pure and easy to assert on.

use super::error::{ClientError, ClientResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Content type marker set on every multipart descriptor
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Header name used for the multipart marker
pub const CONTENT_TYPE: &str = "Content-Type";

/// HTTP method used by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Binary file sent as one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ClientError::Attachment {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Value of a single multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartValue {
    Text(String),
    File(Attachment),
}

/// Ordered multipart form: field name to text or file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    fields: Vec<(String, MultipartValue)>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn every top-level field of a JSON object into a text part.
    /// Nulls are skipped, strings are sent raw, everything else as its JSON text.
    pub fn from_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut payload = Self::new();
        for (name, value) in object {
            match value {
                Value::Null => {}
                Value::String(s) => payload.push_text(name, s.clone()),
                other => payload.push_text(name, other.to_string()),
            }
        }
        payload
    }

    /// Set a text field, replacing any existing field of the same name
    pub fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, MultipartValue::Text(value.into()));
    }

    /// Set a file field, replacing any existing field of the same name
    pub fn push_file(&mut self, name: &str, attachment: Attachment) {
        self.set(name, MultipartValue::File(attachment));
    }

    fn set(&mut self, name: &str, value: MultipartValue) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MultipartValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, MultipartValue)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<(String, MultipartValue)> {
        self.fields
    }
}

/// Body of a request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartPayload),
}

impl RequestBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartPayload> {
        match self {
            RequestBody::Multipart(p) => Some(p),
            _ => None,
        }
    }
}

/// Everything a transport needs to issue one request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the backend base URL, exactly as the backend names it
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: BTreeMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart body and set the content-type marker
    pub fn multipart(mut self, payload: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self.header(CONTENT_TYPE, MULTIPART_CONTENT_TYPE)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
