use super::{FieldSet, Task, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An activity on a task, such as a comment or an assignment change.
///
/// Stories are generated by the system and are read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    #[serde(rename = "gid")]
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<User>,
    /// Human-readable text, without the creator's name.
    pub text: Option<String>,
    /// HTML text of a comment. Only returned when requested through
    /// `opt_fields`.
    pub html_text: Option<String>,
    /// The object the story is about.
    pub target: Option<Box<Task>>,
    /// The part of the product that produced the story.
    pub source: Option<String>,
    /// `comment` or `system`.
    #[serde(rename = "type")]
    pub story_type: Option<String>,
    pub resource_subtype: Option<String>,
    pub liked: Option<bool>,
    pub num_likes: Option<u32>,
}

impl FieldSet for Story {
    const FIELDS: &'static [&'static str] = &[
        "gid",
        "created_at",
        "created_by",
        "text",
        "html_text",
        "target",
        "source",
        "type",
        "resource_subtype",
        "liked",
        "num_likes",
    ];
}
