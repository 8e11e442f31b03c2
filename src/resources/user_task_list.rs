use super::{segment, FieldSet, User, Workspace};
use crate::{Client, Options, Result, ResultExt};
use serde::{Deserialize, Serialize};

/// The "My Tasks" list of a user in one workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTaskList {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The name of the list.
    pub name: Option<String>,
    /// The owner of the list.
    pub owner: Option<User>,
    /// The workspace the list belongs to.
    pub workspace: Option<Workspace>,
}

impl FieldSet for UserTaskList {
    const FIELDS: &'static [&'static str] = &["gid", "name", "owner", "workspace"];
}

impl UserTaskList {
    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<UserTaskList> {
        tracing::trace!(user_task_list = %self.id, "Loading user task list details");
        let path = format!("/user_task_lists/{}", segment("user task list", &self.id)?);
        let response = client
            .get::<_, UserTaskList>(&path, (), options)
            .await
            .context(format!("fetching user task list {}", self.id))?;
        Ok(response.data)
    }
}
