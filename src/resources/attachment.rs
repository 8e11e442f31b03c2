use super::{segment, FieldSet, Task};
use crate::{Client, Error, Options, Result, ResultExt, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file attached to a task, either uploaded or hosted by a third party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The file name.
    pub name: Option<String>,
    /// `asana` for uploads, `external` for links.
    pub resource_subtype: Option<String>,
    /// The task this attachment belongs to.
    pub parent: Option<Box<Task>>,
    /// When the attachment was created.
    pub created_at: Option<DateTime<Utc>>,
    /// A short-lived URL for the content. Refresh it on demand rather than
    /// storing it.
    pub download_url: Option<String>,
    /// The hosting service: `asana`, `dropbox`, `gdrive`, `box` or `external`.
    pub host: Option<String>,
    /// A URL suitable for viewing the attachment in a browser.
    pub view_url: Option<String>,
}

impl FieldSet for Attachment {
    const FIELDS: &'static [&'static str] = &[
        "gid",
        "name",
        "resource_subtype",
        "parent",
        "created_at",
        "download_url",
        "host",
        "view_url",
    ];
}

/// A link to a file hosted elsewhere, attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalAttachmentRequest {
    /// The name shown for the attachment.
    pub name: String,
    /// The URL of the external resource.
    pub url: String,
}

impl Validate for ExternalAttachmentRequest {
    fn validate(&mut self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::Validation(
                "external attachment requires a url".to_string(),
            ));
        }
        Ok(())
    }
}

/// The body of `POST /attachments` for an external link.
#[derive(Serialize)]
pub(crate) struct ExternalAttachmentBody<'a> {
    parent: &'a str,
    resource_subtype: &'static str,
    #[serde(flatten)]
    request: ExternalAttachmentRequest,
}

impl Validate for ExternalAttachmentBody<'_> {
    fn validate(&mut self) -> Result<()> {
        self.request.validate()
    }
}

impl<'a> ExternalAttachmentBody<'a> {
    pub(crate) fn new(parent: &'a str, request: ExternalAttachmentRequest) -> Self {
        Self {
            parent,
            resource_subtype: "external",
            request,
        }
    }
}

impl Attachment {
    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Attachment> {
        tracing::trace!(attachment = %self.id, "Loading attachment details");
        let path = format!("/attachments/{}", segment("attachment", &self.id)?);
        let response = client
            .get::<_, Attachment>(&path, (), options)
            .await
            .context(format!("fetching attachment {}", self.id))?;
        Ok(response.data)
    }
}
