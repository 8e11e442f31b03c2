//! The JSON envelope wrapping every Asana API response.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A pagination cursor returned by list endpoints.
///
/// The cursor is opaque: pass `offset` back verbatim as
/// [`Options::offset`](crate::Options::offset) to fetch the next page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NextPage {
    /// The opaque offset token.
    #[serde(default)]
    pub offset: String,
    /// The relative path of the next page.
    #[serde(default)]
    pub path: String,
    /// The absolute URI of the next page.
    #[serde(default)]
    pub uri: String,
}

/// One entry of the `errors` array of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorDetail {
    /// A description of the problem.
    #[serde(default)]
    pub message: String,
    /// A human-readable phrase identifying a 5xx incident.
    pub phrase: Option<String>,
    /// A pointer to relevant documentation.
    pub help: Option<String>,
}

/// A decoded response body: `{"data": ..., "next_page": ..., "errors": [...]}`.
///
/// `data` is kept as raw JSON so it can be decoded into the caller's type
/// and stored in the response cache without a second serialization.
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    /// The payload. `None` when the field is absent or `null`.
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
    /// The cursor for the next page, if there is one.
    #[serde(default)]
    pub next_page: Option<NextPage>,
    /// Errors reported by the API, in order.
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

impl Envelope {
    /// Parses a response body.
    pub fn parse(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Returns the first reported error, if any.
    pub fn first_error(&self) -> Option<&ErrorDetail> {
        self.errors.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_and_next_page() {
        let body = br#"{"data":[{"gid":"1"}],"next_page":{"offset":"abc","path":"/projects/9/tasks?offset=abc","uri":"https://app.asana.com/api/1.0/projects/9/tasks?offset=abc"}}"#;
        let envelope = Envelope::parse(body).unwrap();

        assert_eq!(envelope.data.unwrap().get(), r#"[{"gid":"1"}]"#);
        assert_eq!(envelope.next_page.unwrap().offset, "abc");
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn test_null_data_and_next_page() {
        let envelope = Envelope::parse(br#"{"data":null,"next_page":null}"#).unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.next_page.is_none());
    }

    #[test]
    fn test_parse_errors() {
        let body = br#"{"errors":[{"message":"task: Unknown object: 7","help":"See docs"},{"message":"second"}]}"#;
        let envelope = Envelope::parse(body).unwrap();

        assert!(envelope.data.is_none());
        let first = envelope.first_error().unwrap();
        assert_eq!(first.message, "task: Unknown object: 7");
        assert_eq!(first.help.as_deref(), Some("See docs"));
        assert_eq!(first.phrase, None);
        assert_eq!(envelope.errors.len(), 2);
    }

    #[test]
    fn test_malformed_body_fails() {
        assert!(Envelope::parse(b"<html>Bad Gateway</html>").is_err());
    }
}
