//! Typed Asana records and the accessors that fetch and modify them.
//!
//! Every accessor takes the [`Client`](crate::Client) explicitly and
//! returns fresh values; records never hold a reference back to the
//! client. List accessors return one [`Page`](crate::Page) at a time,
//! while `all_*` variants walk every page.

mod attachment;
mod custom_field;
mod portfolio;
mod project;
mod section;
mod story;
mod tag;
mod task;
mod team;
mod user;
mod user_task_list;
mod workspace;

pub use attachment::{Attachment, ExternalAttachmentRequest};
pub use custom_field::{CustomField, CustomFieldSetting, CustomFieldValue, EnumValue};
pub use portfolio::Portfolio;
pub use project::{
    CreateProjectRequest, Project, ProjectBase, ProjectStatus, UpdateProjectRequest, View,
};
pub use section::{Section, SectionBase, SectionInsertRequest};
pub use story::Story;
pub use tag::{Tag, TagBase};
pub use task::{
    AddDependenciesRequest, AddDependentsRequest, AddProjectRequest, CreateMembership,
    CreateTaskRequest, ExternalData, Membership, SetParentRequest, Task, TaskBase, TaskQuery,
    UpdateTaskRequest,
};
pub use team::Team;
pub use user::User;
pub use user_task_list::UserTaskList;
pub use workspace::Workspace;

use crate::{Error, Result};
use serde::{Serialize, Serializer};

/// Page size used when walking project lists.
pub const PROJECT_PAGE_SIZE: u32 = 100;

/// Page size used when walking tag lists.
pub const TAG_PAGE_SIZE: u32 = 50;

/// Page size used when walking task lists.
pub const TASK_PAGE_SIZE: u32 = 100;

/// The complete list of JSON field names of a record.
///
/// Used with [`Options::fields_of`](crate::Options::fields_of) to ask the
/// API for every field rather than the compact representation.
pub trait FieldSet {
    /// Field names, as sent in `opt_fields`.
    const FIELDS: &'static [&'static str];
}

/// Checks that an id can be used as a single path segment.
pub(crate) fn segment<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.is_empty() {
        return Err(Error::Validation(format!("{} id is empty", kind)));
    }
    if id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(Error::Validation(format!(
            "{} id {:?} is not a valid path segment",
            kind, id
        )));
    }
    Ok(id)
}

/// Where to place an item relative to its siblings.
///
/// `Edge` means the beginning of the list when used as `insert_after` and
/// the end of the list when used as `insert_before`. It is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Next to the sibling with this id.
    Item(String),
    /// At the start or end of the list.
    Edge,
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Anchor::Item(id) => serializer.serialize_str(id),
            Anchor::Edge => serializer.serialize_none(),
        }
    }
}
