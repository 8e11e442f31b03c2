//! Per-request metadata and body types.

use crate::query::{self, QueryPairs};
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Metadata for an individual API request.
///
/// Built by the pipeline after options have been merged and the payload
/// validated.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method.
    pub method: Method,

    /// The request path relative to the base URL, starting with `/`.
    pub path: String,

    /// Query parameters, in encoding order.
    pub query: QueryPairs,

    /// Headers for this request only, such as feature toggles.
    pub headers: HeaderMap,

    /// The correlation id used in logs and errors.
    pub request_id: String,
}

impl RequestMetadata {
    /// Creates metadata with a fresh correlation id.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            request_id: new_request_id(),
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a query parameter, replacing any parameter of the same name.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        query::overlay(&mut self.query, vec![(key.into(), value.into())]);
        self
    }

    /// The path and query string. This is also the response cache key.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query::to_query_string(&self.query))
        }
    }
}

/// Generates a correlation id for a request.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A file to send with [`Client::post_multipart`](crate::Client::post_multipart).
#[derive(Debug)]
pub struct Upload {
    /// The form field name, usually `file`.
    pub field_name: String,
    /// The file name reported to the server.
    pub file_name: String,
    /// The MIME type of the content.
    pub content_type: String,
    /// The file content.
    pub body: reqwest::Body,
}

impl Upload {
    /// Creates an upload in the `file` form field.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<reqwest::Body>,
    ) -> Self {
        Self {
            field_name: "file".to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Uses a different form field name.
    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub(crate) fn into_form(self) -> crate::Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::stream(self.body)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| crate::Error::Encoding(format!("Invalid content type: {}", e)))?;
        Ok(reqwest::multipart::Form::new().part(self.field_name, part))
    }
}

/// The body of a request.
#[derive(Debug)]
pub(crate) enum RequestBody {
    /// No body.
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// A multipart form with a single file.
    Multipart(Upload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        let metadata = RequestMetadata::new(Method::GET, "/tasks")
            .with_query_param("project", "9")
            .with_query_param("opt_fields", "name,notes")
            .with_query_param("project", "10");

        assert_eq!(metadata.path_and_query(), "/tasks?project=10&opt_fields=name%2Cnotes");
    }

    #[test]
    fn test_path_without_query() {
        let metadata = RequestMetadata::new(Method::DELETE, "/tasks/1");
        assert_eq!(metadata.path_and_query(), "/tasks/1");
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestMetadata::new(Method::GET, "/users/me");
        let b = RequestMetadata::new(Method::GET, "/users/me");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.request_id.len(), 32);
    }

    #[test]
    fn test_invalid_header() {
        let result = RequestMetadata::new(Method::GET, "/users/me").with_header("bad header", "x");
        assert!(matches!(result, Err(crate::Error::Configuration(_))));
    }

    #[test]
    fn test_upload_form() {
        let upload = Upload::new("notes.txt", "text/plain", "hello".to_string());
        assert_eq!(upload.field_name, "file");
        assert!(upload.into_form().is_ok());

        let upload = Upload::new("notes.txt", "not a mime type", Vec::<u8>::new());
        assert!(matches!(upload.into_form(), Err(crate::Error::Encoding(_))));
    }
}
