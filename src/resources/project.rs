use super::{
    segment, CustomFieldSetting, CustomFieldValue, FieldSet, Section, SectionBase,
    SectionInsertRequest, Task, Team, User, Workspace, TASK_PAGE_SIZE,
};
use crate::{Client, Options, Page, Result, ResultExt, Validate};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The latest status update of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStatus {
    /// `green`, `yellow` or `red`.
    pub color: Option<String>,
    pub text: Option<String>,
    pub author: Option<User>,
}

/// The default layout of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    List,
    Board,
    Calendar,
    Timeline,
    /// A layout this client does not know about.
    #[serde(other)]
    Other,
}

/// The fields of a project that can be written as well as read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectBase {
    /// The name of the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Archived projects are hidden from most views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_view: Option<View>,
    /// The day on which the project is due.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    /// The day on which work on the project begins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    /// Whether the project is visible to the whole organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

/// A prioritized list of tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    #[serde(flatten)]
    pub base: ProjectBase,
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time. Changes to associations such as tasks or
    /// comments are not reflected.
    pub modified_at: Option<DateTime<Utc>>,
    pub custom_field_settings: Vec<CustomFieldSetting>,
    pub custom_fields: Vec<CustomFieldValue>,
    pub members: Vec<User>,
    pub followers: Vec<User>,
    pub owner: Option<User>,
    pub team: Option<Team>,
    pub workspace: Option<Workspace>,
}

impl FieldSet for Project {
    const FIELDS: &'static [&'static str] = &[
        "gid",
        "name",
        "archived",
        "color",
        "current_status",
        "default_view",
        "due_on",
        "start_on",
        "notes",
        "html_notes",
        "icon",
        "is_template",
        "public",
        "created_at",
        "modified_at",
        "custom_field_settings",
        "custom_fields",
        "members",
        "followers",
        "owner",
        "team",
        "workspace",
    ];
}

/// A new project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateProjectRequest {
    #[serde(flatten)]
    pub base: ProjectBase,
    /// Required unless the project is created through a team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Custom field values keyed by custom field id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Validate for CreateProjectRequest {}

/// Changes to an existing project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProjectRequest {
    #[serde(flatten)]
    pub base: ProjectBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Validate for UpdateProjectRequest {}

impl Client {
    /// Creates a project in the workspace or team named by the request.
    pub async fn create_project(&self, project: CreateProjectRequest) -> Result<Project> {
        tracing::info!(
            name = project.base.name.as_deref().unwrap_or_default(),
            "Creating project"
        );
        let response = self
            .post::<_, Project>("/projects", project, &[])
            .await
            .context("creating project")?;
        Ok(response.data)
    }
}

impl Project {
    /// A project known only by id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Project> {
        tracing::trace!(project = %self.id, "Loading project details");
        let path = format!("/projects/{}", segment("project", &self.id)?);
        let response = client
            .get::<_, Project>(&path, (), options)
            .await
            .context(format!("fetching project {}", self.id))?;
        Ok(response.data)
    }

    /// Applies changes and returns the updated record.
    ///
    /// Only fields set in `request` are changed.
    pub async fn update(
        &self,
        client: &Client,
        request: UpdateProjectRequest,
        options: &[Options],
    ) -> Result<Project> {
        tracing::trace!(project = %self.id, "Updating project");
        let path = format!("/projects/{}", segment("project", &self.id)?);
        let response = client
            .put::<_, Project>(&path, request, options)
            .await
            .context(format!("updating project {}", self.id))?;
        Ok(response.data)
    }

    /// Lists one page of tasks in the project.
    pub async fn tasks(&self, client: &Client, options: &[Options]) -> Result<Page<Task>> {
        tracing::trace!(project = %self.id, "Listing tasks");
        let path = format!("/projects/{}/tasks", segment("project", &self.id)?);
        let response = client
            .get::<_, Vec<Task>>(&path, (), options)
            .await
            .context(format!("listing tasks in project {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists every task in the project.
    pub async fn all_tasks(&self, client: &Client, options: &[Options]) -> Result<Vec<Task>> {
        let path = format!("/projects/{}/tasks", segment("project", &self.id)?);
        client
            .get_all(&path, (), TASK_PAGE_SIZE, options)
            .await
            .context(format!("listing tasks in project {}", self.id))
    }

    /// Lists one page of sections in the project.
    pub async fn sections(&self, client: &Client, options: &[Options]) -> Result<Page<Section>> {
        tracing::trace!(project = %self.id, "Listing sections");
        let path = format!("/projects/{}/sections", segment("project", &self.id)?);
        let response = client
            .get::<_, Vec<Section>>(&path, (), options)
            .await
            .context(format!("listing sections in project {}", self.id))?;
        Ok(response.into_page())
    }

    /// Creates a section at the end of the project.
    pub async fn create_section(&self, client: &Client, section: SectionBase) -> Result<Section> {
        tracing::info!(
            project = %self.id,
            name = section.name.as_deref().unwrap_or_default(),
            "Creating section"
        );
        let path = format!("/projects/{}/sections", segment("project", &self.id)?);
        let response = client
            .post::<_, Section>(&path, section, &[])
            .await
            .context(format!("creating section in project {}", self.id))?;
        Ok(response.data)
    }

    /// Moves a section within the project.
    pub async fn insert_section(&self, client: &Client, request: SectionInsertRequest) -> Result<()> {
        tracing::info!(project = %self.id, section = %request.section, "Moving section");
        let path = format!("/projects/{}/sections/insert", segment("project", &self.id)?);
        client
            .post::<_, IgnoredAny>(&path, request, &[])
            .await
            .context(format!("moving section in project {}", self.id))?;
        Ok(())
    }
}
