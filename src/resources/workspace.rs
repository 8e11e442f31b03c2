use super::{
    segment, CustomField, FieldSet, Portfolio, Project, Tag, TagBase, Team, PROJECT_PAGE_SIZE,
    TAG_PAGE_SIZE,
};
use crate::{Client, Options, Page, Result, ResultExt, Validate};
use serde::{Deserialize, Serialize};

/// The highest-level organizational unit. All projects and tasks belong to
/// a workspace.
///
/// An organization is a special kind of workspace that represents a
/// company and groups its projects into teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The name of the workspace.
    pub name: Option<String>,
    /// Whether the workspace is an organization.
    pub is_organization: Option<bool>,
    /// Email domains associated with the organization.
    pub email_domains: Vec<String>,
}

impl FieldSet for Workspace {
    const FIELDS: &'static [&'static str] = &["gid", "name", "is_organization", "email_domains"];
}

#[derive(Clone, Serialize)]
struct FavoritesQuery<'a> {
    resource_type: &'static str,
    workspace: &'a str,
}

impl Validate for FavoritesQuery<'_> {}

impl Client {
    /// Lists the workspaces and organizations visible to the authorized
    /// user, with every field populated.
    pub async fn workspaces(&self) -> Result<Vec<Workspace>> {
        tracing::trace!("Listing workspaces");
        let options = [Options::fields_of::<Workspace>()];
        self.get_all("/workspaces", (), PROJECT_PAGE_SIZE, &options)
            .await
            .context("listing workspaces")
    }
}

impl Workspace {
    /// A workspace known only by id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Workspace> {
        tracing::trace!(workspace = %self.id, "Loading workspace details");
        let path = format!("/workspaces/{}", segment("workspace", &self.id)?);
        let response = client
            .get::<_, Workspace>(&path, (), options)
            .await
            .context(format!("fetching workspace {}", self.id))?;
        Ok(response.data)
    }

    /// Lists one page of projects in the workspace.
    pub async fn projects(&self, client: &Client, options: &[Options]) -> Result<Page<Project>> {
        tracing::trace!(workspace = %self.id, "Listing projects");
        let path = format!("/workspaces/{}/projects", segment("workspace", &self.id)?);
        let response = client
            .get::<_, Vec<Project>>(&path, (), options)
            .await
            .context(format!("listing projects in workspace {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists every project in the workspace.
    pub async fn all_projects(&self, client: &Client, options: &[Options]) -> Result<Vec<Project>> {
        let path = format!("/workspaces/{}/projects", segment("workspace", &self.id)?);
        client
            .get_all(&path, (), PROJECT_PAGE_SIZE, options)
            .await
            .context(format!("listing projects in workspace {}", self.id))
    }

    /// Lists one page of the authorized user's favorite projects in this
    /// workspace.
    pub async fn favorite_projects(
        &self,
        client: &Client,
        options: &[Options],
    ) -> Result<Page<Project>> {
        tracing::trace!(workspace = %self.id, "Listing favorite projects");
        let user = client.current_user().await?;
        let path = format!("/users/{}/favorites", segment("user", &user.id)?);
        let query = FavoritesQuery {
            resource_type: "project",
            workspace: segment("workspace", &self.id)?,
        };
        let response = client
            .get::<_, Vec<Project>>(&path, query, options)
            .await
            .context(format!("listing favorite projects in workspace {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists every favorite project of the authorized user in this
    /// workspace.
    pub async fn all_favorite_projects(
        &self,
        client: &Client,
        options: &[Options],
    ) -> Result<Vec<Project>> {
        let user = client.current_user().await?;
        let path = format!("/users/{}/favorites", segment("user", &user.id)?);
        let query = FavoritesQuery {
            resource_type: "project",
            workspace: segment("workspace", &self.id)?,
        };
        client
            .get_all(&path, query, PROJECT_PAGE_SIZE, options)
            .await
            .context(format!("listing favorite projects in workspace {}", self.id))
    }

    /// Lists one page of tags in the workspace.
    pub async fn tags(&self, client: &Client, options: &[Options]) -> Result<Page<Tag>> {
        tracing::trace!(workspace = %self.id, "Listing tags");
        let path = format!("/workspaces/{}/tags", segment("workspace", &self.id)?);
        let response = client
            .get::<_, Vec<Tag>>(&path, (), options)
            .await
            .context(format!("listing tags in workspace {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists every tag in the workspace.
    ///
    /// With a response cache configured, the final page is served from the
    /// cache until it expires. Pages followed by a cursor are always
    /// fetched again.
    pub async fn all_tags(&self, client: &Client, options: &[Options]) -> Result<Vec<Tag>> {
        let path = format!("/workspaces/{}/tags", segment("workspace", &self.id)?);
        client
            .get_all(&path, (), TAG_PAGE_SIZE, options)
            .await
            .context(format!("listing tags in workspace {}", self.id))
    }

    /// Creates a tag in the workspace.
    pub async fn create_tag(&self, client: &Client, tag: &TagBase, options: &[Options]) -> Result<Tag> {
        tracing::info!(
            workspace = %self.id,
            name = tag.name.as_deref().unwrap_or_default(),
            "Creating tag"
        );
        let path = format!("/workspaces/{}/tags", segment("workspace", &self.id)?);
        let response = client
            .post::<_, Tag>(&path, tag.clone(), options)
            .await
            .context(format!("creating tag in workspace {}", self.id))?;
        Ok(response.data)
    }

    /// Lists one page of teams in the organization visible to the
    /// authorized user.
    pub async fn teams(&self, client: &Client, options: &[Options]) -> Result<Page<Team>> {
        tracing::trace!(workspace = %self.id, "Listing teams");
        let path = format!("/organizations/{}/teams", segment("workspace", &self.id)?);
        let response = client
            .get::<_, Vec<Team>>(&path, (), options)
            .await
            .context(format!("listing teams in organization {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists one page of portfolios in the workspace owned by the
    /// authorized user.
    pub async fn portfolios(&self, client: &Client, options: &[Options]) -> Result<Page<Portfolio>> {
        tracing::trace!(workspace = %self.id, "Listing portfolios");
        let query = Portfolio::query(segment("workspace", &self.id)?);
        let response = client
            .get::<_, Vec<Portfolio>>("/portfolios", query, options)
            .await
            .context(format!("listing portfolios in workspace {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists one page of the custom fields defined in the workspace.
    pub async fn custom_fields(
        &self,
        client: &Client,
        options: &[Options],
    ) -> Result<Page<CustomField>> {
        tracing::trace!(workspace = %self.id, "Listing custom fields");
        let path = format!("/workspaces/{}/custom_fields", segment("workspace", &self.id)?);
        let response = client
            .get::<_, Vec<CustomField>>(&path, (), options)
            .await
            .context(format!("listing custom fields in workspace {}", self.id))?;
        Ok(response.into_page())
    }
}
