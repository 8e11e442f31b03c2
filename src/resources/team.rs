use super::{
    segment, CreateProjectRequest, FieldSet, Project, Workspace, PROJECT_PAGE_SIZE,
};
use crate::{Client, Options, Page, Result, ResultExt};
use serde::{Deserialize, Serialize};

/// A group of related projects and people within an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The name of the team.
    pub name: Option<String>,
    /// The organization the team belongs to. Only returned when requested
    /// through `opt_fields`.
    pub organization: Option<Workspace>,
}

impl FieldSet for Team {
    const FIELDS: &'static [&'static str] = &["gid", "name", "organization"];
}

impl Team {
    /// Loads the full record, including the organization. Fields selected
    /// in `options` replace the full field list.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Team> {
        tracing::trace!(team = %self.id, "Loading team details");
        let path = format!("/teams/{}", segment("team", &self.id)?);
        let mut all = vec![Options::fields_of::<Team>()];
        all.extend_from_slice(options);
        let response = client
            .get::<_, Team>(&path, (), &all)
            .await
            .context(format!("fetching team {}", self.id))?;
        Ok(response.data)
    }

    /// Lists one page of projects in the team.
    pub async fn projects(&self, client: &Client, options: &[Options]) -> Result<Page<Project>> {
        tracing::trace!(team = %self.id, "Listing projects");
        let path = format!("/teams/{}/projects", segment("team", &self.id)?);
        let response = client
            .get::<_, Vec<Project>>(&path, (), options)
            .await
            .context(format!("listing projects in team {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists every project in the team.
    pub async fn all_projects(&self, client: &Client, options: &[Options]) -> Result<Vec<Project>> {
        let path = format!("/teams/{}/projects", segment("team", &self.id)?);
        client
            .get_all(&path, (), PROJECT_PAGE_SIZE, options)
            .await
            .context(format!("listing projects in team {}", self.id))
    }

    /// Creates a project shared with the team.
    pub async fn create_project(
        &self,
        client: &Client,
        project: CreateProjectRequest,
        options: &[Options],
    ) -> Result<Project> {
        tracing::info!(
            team = %self.id,
            name = project.base.name.as_deref().unwrap_or_default(),
            "Creating project"
        );
        let path = format!("/teams/{}/projects", segment("team", &self.id)?);
        let response = client
            .post::<_, Project>(&path, project, options)
            .await
            .context(format!("creating project in team {}", self.id))?;
        Ok(response.data)
    }
}
