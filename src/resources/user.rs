use super::{FieldSet, Workspace};
use crate::{Client, Options, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An account that can be given access to workspaces, projects and tasks.
///
/// The special id `me` refers to the authorized user wherever a user id is
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The user's name.
    pub name: Option<String>,
    /// The user's email address.
    pub email: Option<String>,
    /// Profile photo URLs keyed by size, e.g. `image_60x60`.
    pub photo: Option<BTreeMap<String, String>>,
    /// Workspaces and organizations this user may access.
    pub workspaces: Vec<Workspace>,
}

impl FieldSet for User {
    const FIELDS: &'static [&'static str] = &["gid", "name", "email", "photo", "workspaces"];
}

impl Client {
    /// Fetches the authorized user.
    pub async fn current_user(&self) -> Result<User> {
        tracing::trace!("Loading current user");
        let response = self
            .get::<_, User>("/users/me", (), &[])
            .await
            .context("fetching current user")?;
        Ok(response.data)
    }
}

impl User {
    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<User> {
        tracing::trace!(user = %self.id, "Loading user details");
        let path = format!("/users/{}", super::segment("user", &self.id)?);
        let response = client
            .get::<_, User>(&path, (), options)
            .await
            .context(format!("fetching user {}", self.id))?;
        Ok(response.data)
    }
}
