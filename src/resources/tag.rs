use super::{segment, FieldSet, User, Workspace};
use crate::{Client, Options, Result, ResultExt, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The writable fields of a tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagBase {
    /// The name of the tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// One of the palette colors, such as `dark-pink` or `light-teal`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Validate for TagBase {}

/// A label that can be attached to tasks in one workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    #[serde(flatten)]
    pub base: TagBase,
    /// When the tag was created.
    pub created_at: Option<DateTime<Utc>>,
    /// The workspace the tag belongs to.
    pub workspace: Option<Workspace>,
    /// Users following the tag.
    pub followers: Vec<User>,
}

impl FieldSet for Tag {
    const FIELDS: &'static [&'static str] = &[
        "gid",
        "name",
        "notes",
        "color",
        "created_at",
        "workspace",
        "followers",
    ];
}

impl Tag {
    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Tag> {
        tracing::trace!(tag = %self.id, "Loading tag details");
        let path = format!("/tags/{}", segment("tag", &self.id)?);
        let response = client
            .get::<_, Tag>(&path, (), options)
            .await
            .context(format!("fetching tag {}", self.id))?;
        Ok(response.data)
    }
}
