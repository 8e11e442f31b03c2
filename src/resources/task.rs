use super::attachment::ExternalAttachmentBody;
use super::{
    segment, Anchor, Attachment, CustomFieldValue, ExternalAttachmentRequest, FieldSet, Project,
    Section, Story, Tag, User, Workspace,
};
use crate::{Client, Error, Options, Page, Result, ResultExt, Upload, Validate};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// App-specific metadata stored on a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalData {
    /// An id in the client application.
    #[serde(rename = "gid", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// An opaque data blob.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// The fields of a task that can be written as well as read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskBase {
    /// The name of the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `default_task`, `milestone` or `section`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_notes: Option<String>,
    /// Scheduling status in the assignee's list: `inbox`, `later`,
    /// `today` or `upcoming`. Only meaningful with an assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// The day the task is due. Mutually exclusive with `due_at`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    /// The moment the task is due. Mutually exclusive with `due_on`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalData>,
    /// Whether the task is shown as a separator in lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_rendered_as_separator: Option<bool>,
}

impl TaskBase {
    /// Drops `due_on` when `due_at` is set, as the API accepts only one.
    fn normalize_due(&mut self) {
        if self.due_at.is_some() {
            self.due_on = None;
        }
    }
}

/// The position of a task in a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Membership {
    pub project: Option<Project>,
    pub section: Option<Section>,
}

/// The basic unit of action in Asana.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    #[serde(flatten)]
    pub base: TaskBase,
    /// The parent of a subtask.
    pub parent: Option<Box<Task>>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub workspace: Option<Workspace>,
    pub assignee: Option<User>,
    pub followers: Vec<User>,
    pub liked: Option<bool>,
    pub likes: Vec<User>,
    pub num_likes: Option<u32>,
    pub num_subtasks: Option<u32>,
    pub custom_fields: Vec<CustomFieldValue>,
    pub projects: Vec<Project>,
    pub memberships: Vec<Membership>,
    pub tags: Vec<Tag>,
    /// Tasks that must be completed before this one.
    pub dependencies: Vec<Task>,
    /// Tasks waiting on this one.
    pub dependents: Vec<Task>,
}

impl FieldSet for Task {
    const FIELDS: &'static [&'static str] = &[
        "gid",
        "name",
        "resource_subtype",
        "notes",
        "html_notes",
        "assignee_status",
        "completed",
        "due_on",
        "due_at",
        "start_on",
        "external",
        "is_rendered_as_separator",
        "parent",
        "created_at",
        "modified_at",
        "completed_at",
        "workspace",
        "assignee",
        "followers",
        "liked",
        "likes",
        "num_likes",
        "num_subtasks",
        "custom_fields",
        "projects",
        "memberships",
        "tags",
        "dependencies",
        "dependents",
    ];
}

/// A project and section to create a task in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateMembership {
    pub project: String,
    pub section: String,
}

/// A new task.
///
/// Before sending, `assignee_status` is dropped when there is no assignee
/// and `due_on` is dropped when `due_at` is set.
///
/// # Examples
///
/// ```no_run
/// use asana_client::resources::{CreateTaskRequest, TaskBase};
/// use asana_client::Client;
///
/// # async fn example() -> Result<(), asana_client::Error> {
/// let client = Client::builder().access_token("0/123").build()?;
///
/// let task = client
///     .create_task(CreateTaskRequest {
///         base: TaskBase {
///             name: Some("Write release notes".to_string()),
///             ..TaskBase::default()
///         },
///         workspace: Some("1".to_string()),
///         projects: vec!["9".to_string()],
///         ..CreateTaskRequest::default()
///     })
///     .await?;
/// println!("Created task {}", task.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    #[serde(flatten)]
    pub base: TaskBase,
    /// The user to assign the task to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub memberships: Vec<CreateMembership>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Custom field values keyed by custom field id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Validate for CreateTaskRequest {
    fn validate(&mut self) -> Result<()> {
        if self.assignee.as_deref().map_or(true, str::is_empty) {
            self.assignee = None;
            self.base.assignee_status = None;
        }
        self.base.normalize_due();
        Ok(())
    }
}

/// Changes to an existing task. Only fields that are set are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(flatten)]
    pub base: TaskBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Validate for UpdateTaskRequest {
    fn validate(&mut self) -> Result<()> {
        self.base.normalize_due();
        Ok(())
    }
}

/// Filters for [`Client::query_tasks`].
///
/// Either `assignee` and `workspace` together, or one of `project`,
/// `section` or `tag`, must be given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Only return tasks that are incomplete or were completed since this
    /// time. Accepts an ISO 8601 timestamp or `now`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_since: Option<String>,
    /// Only return tasks modified since this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
}

impl Validate for TaskQuery {
    fn validate(&mut self) -> Result<()> {
        match (&self.assignee, &self.workspace) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::Validation(
                    "task query needs assignee and workspace together".to_string(),
                ))
            }
            (Some(_), Some(_)) => return Ok(()),
            (None, None) => {}
        }
        if self.project.is_none() && self.section.is_none() && self.tag.is_none() {
            return Err(Error::Validation(
                "task query needs a project, section, tag, or assignee and workspace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Adds a task to a project, optionally at a given position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddProjectRequest {
    /// The project to add the task to.
    pub project: String,
    /// The task to insert after. [`Anchor::Edge`] means the top.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_after: Option<Anchor>,
    /// The task to insert before. [`Anchor::Edge`] means the bottom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_before: Option<Anchor>,
    /// A section of the project to add the task to, at the bottom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Validate for AddProjectRequest {
    fn validate(&mut self) -> Result<()> {
        if self.project.is_empty() {
            return Err(Error::Validation("add project requires a project".to_string()));
        }
        if self.insert_after.is_some() && self.insert_before.is_some() {
            return Err(Error::Validation(
                "add project takes only one of insert_after and insert_before".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RemoveProjectRequest<'a> {
    project: &'a str,
}

impl Validate for RemoveProjectRequest<'_> {}

/// Changes the parent of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetParentRequest {
    /// The new parent, or `None` to make the task top-level.
    pub parent: Option<String>,
    /// The subtask to insert after. [`Anchor::Edge`] means the top.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_after: Option<Anchor>,
    /// The subtask to insert before. [`Anchor::Edge`] means the bottom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_before: Option<Anchor>,
}

impl Validate for SetParentRequest {
    fn validate(&mut self) -> Result<()> {
        if self.insert_after.is_some() && self.insert_before.is_some() {
            return Err(Error::Validation(
                "set parent takes only one of insert_after and insert_before".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tasks that must be completed before a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddDependenciesRequest {
    pub dependencies: Vec<String>,
}

impl Validate for AddDependenciesRequest {}

/// Tasks that wait on a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddDependentsRequest {
    pub dependents: Vec<String>,
}

impl Validate for AddDependentsRequest {}

impl Client {
    /// Creates a task.
    pub async fn create_task(&self, task: CreateTaskRequest) -> Result<Task> {
        tracing::info!(
            name = task.base.name.as_deref().unwrap_or_default(),
            "Creating task"
        );
        let response = self
            .post::<_, Task>("/tasks", task, &[])
            .await
            .context("creating task")?;
        Ok(response.data)
    }

    /// Lists one page of tasks matching a query.
    pub async fn query_tasks(&self, query: TaskQuery, options: &[Options]) -> Result<Page<Task>> {
        tracing::trace!("Querying tasks");
        let response = self
            .get::<_, Vec<Task>>("/tasks", query, options)
            .await
            .context("querying tasks")?;
        Ok(response.into_page())
    }
}

impl Task {
    /// A task known only by id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    fn path(&self, suffix: &str) -> Result<String> {
        Ok(format!("/tasks/{}{}", segment("task", &self.id)?, suffix))
    }

    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Task> {
        tracing::trace!(task = %self.id, "Loading task details");
        let response = client
            .get::<_, Task>(&self.path("")?, (), options)
            .await
            .context(format!("fetching task {}", self.id))?;
        Ok(response.data)
    }

    /// Applies changes and returns the updated record.
    pub async fn update(
        &self,
        client: &Client,
        update: UpdateTaskRequest,
        options: &[Options],
    ) -> Result<Task> {
        tracing::trace!(task = %self.id, "Updating task");
        let response = client
            .put::<_, Task>(&self.path("")?, update, options)
            .await
            .context(format!("updating task {}", self.id))?;
        Ok(response.data)
    }

    /// Deletes the task.
    pub async fn delete(&self, client: &Client) -> Result<()> {
        tracing::info!(task = %self.id, "Deleting task");
        client
            .delete(&self.path("")?, &[])
            .await
            .context(format!("deleting task {}", self.id))
    }

    /// Lists one page of subtasks.
    pub async fn subtasks(&self, client: &Client, options: &[Options]) -> Result<Page<Task>> {
        tracing::trace!(task = %self.id, "Listing subtasks");
        let response = client
            .get::<_, Vec<Task>>(&self.path("/subtasks")?, (), options)
            .await
            .context(format!("listing subtasks of task {}", self.id))?;
        Ok(response.into_page())
    }

    /// Creates a subtask.
    pub async fn create_subtask(&self, client: &Client, task: CreateTaskRequest) -> Result<Task> {
        tracing::info!(
            task = %self.id,
            name = task.base.name.as_deref().unwrap_or_default(),
            "Creating subtask"
        );
        let response = client
            .post::<_, Task>(&self.path("/subtasks")?, task, &[])
            .await
            .context(format!("creating subtask of task {}", self.id))?;
        Ok(response.data)
    }

    /// Adds the task to a project.
    pub async fn add_project(&self, client: &Client, request: AddProjectRequest) -> Result<()> {
        tracing::trace!(task = %self.id, project = %request.project, "Adding task to project");
        client
            .post::<_, IgnoredAny>(&self.path("/addProject")?, request, &[])
            .await
            .context(format!("adding task {} to project", self.id))?;
        Ok(())
    }

    /// Removes the task from a project.
    pub async fn remove_project(&self, client: &Client, project: &str) -> Result<()> {
        tracing::trace!(task = %self.id, project = project, "Removing task from project");
        let request = RemoveProjectRequest { project };
        client
            .post::<_, IgnoredAny>(&self.path("/removeProject")?, request, &[])
            .await
            .context(format!("removing task {} from project {}", self.id, project))?;
        Ok(())
    }

    /// Moves the task under another parent, or to the top level.
    pub async fn set_parent(&self, client: &Client, request: SetParentRequest) -> Result<()> {
        tracing::trace!(
            task = %self.id,
            parent = request.parent.as_deref().unwrap_or_default(),
            "Setting task parent"
        );
        client
            .post::<_, IgnoredAny>(&self.path("/setParent")?, request, &[])
            .await
            .context(format!("setting parent of task {}", self.id))?;
        Ok(())
    }

    /// Marks other tasks as prerequisites of this one.
    pub async fn add_dependencies(
        &self,
        client: &Client,
        request: AddDependenciesRequest,
    ) -> Result<()> {
        tracing::trace!(task = %self.id, count = request.dependencies.len(), "Adding dependencies");
        client
            .post::<_, IgnoredAny>(&self.path("/addDependencies")?, request, &[])
            .await
            .context(format!("adding dependencies to task {}", self.id))?;
        Ok(())
    }

    /// Marks other tasks as waiting on this one.
    pub async fn add_dependents(&self, client: &Client, request: AddDependentsRequest) -> Result<()> {
        tracing::trace!(task = %self.id, count = request.dependents.len(), "Adding dependents");
        client
            .post::<_, IgnoredAny>(&self.path("/addDependents")?, request, &[])
            .await
            .context(format!("adding dependents to task {}", self.id))?;
        Ok(())
    }

    /// Lists one page of stories, including comments.
    pub async fn stories(&self, client: &Client, options: &[Options]) -> Result<Page<Story>> {
        tracing::trace!(task = %self.id, "Listing stories");
        let response = client
            .get::<_, Vec<Story>>(&self.path("/stories")?, (), options)
            .await
            .context(format!("listing stories of task {}", self.id))?;
        Ok(response.into_page())
    }

    /// Lists one page of attachments.
    pub async fn attachments(&self, client: &Client, options: &[Options]) -> Result<Page<Attachment>> {
        tracing::trace!(task = %self.id, "Listing attachments");
        let response = client
            .get::<_, Vec<Attachment>>(&self.path("/attachments")?, (), options)
            .await
            .context(format!("listing attachments of task {}", self.id))?;
        Ok(response.into_page())
    }

    /// Uploads a file and attaches it to the task.
    pub async fn create_attachment(&self, client: &Client, upload: Upload) -> Result<Attachment> {
        tracing::info!(task = %self.id, file_name = %upload.file_name, "Uploading attachment");
        let response = client
            .post_multipart::<Attachment>(&self.path("/attachments")?, upload, &[])
            .await
            .context(format!("uploading attachment to task {}", self.id))?;
        Ok(response.data)
    }

    /// Attaches a link to an externally hosted file.
    pub async fn create_external_attachment(
        &self,
        client: &Client,
        request: ExternalAttachmentRequest,
    ) -> Result<Attachment> {
        tracing::info!(task = %self.id, url = %request.url, "Attaching external link");
        let body = ExternalAttachmentBody::new(segment("task", &self.id)?, request);
        let response = client
            .post::<_, Attachment>("/attachments", body, &[])
            .await
            .context(format!("attaching link to task {}", self.id))?;
        Ok(response.data)
    }
}
