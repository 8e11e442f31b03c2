use super::{segment, FieldSet, Project, Task};
use crate::{Client, Error, Options, Page, Result, ResultExt, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The writable fields of a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionBase {
    /// The name of the section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Validate for SectionBase {}

/// A division of a project's tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    #[serde(flatten)]
    pub base: SectionBase,
    /// When the section was created.
    pub created_at: Option<DateTime<Utc>>,
    /// The project containing the section.
    pub project: Option<Box<Project>>,
}

impl FieldSet for Section {
    const FIELDS: &'static [&'static str] = &["gid", "name", "created_at", "project"];
}

/// Moves a section before or after another section of the same project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionInsertRequest {
    /// The section to move.
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_section: Option<String>,
}

impl Validate for SectionInsertRequest {
    fn validate(&mut self) -> Result<()> {
        if self.section.is_empty() {
            return Err(Error::Validation("section insert requires a section".to_string()));
        }
        match (&self.before_section, &self.after_section) {
            (Some(_), Some(_)) => Err(Error::Validation(
                "section insert takes only one of before_section and after_section".to_string(),
            )),
            (None, None) => Err(Error::Validation(
                "section insert requires before_section or after_section".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Section {
    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<Section> {
        tracing::trace!(section = %self.id, "Loading section details");
        let path = format!("/sections/{}", segment("section", &self.id)?);
        let response = client
            .get::<_, Section>(&path, (), options)
            .await
            .context(format!("fetching section {}", self.id))?;
        Ok(response.data)
    }

    /// Lists one page of tasks in the section.
    pub async fn tasks(&self, client: &Client, options: &[Options]) -> Result<Page<Task>> {
        tracing::trace!(section = %self.id, "Listing tasks");
        let path = format!("/sections/{}/tasks", segment("section", &self.id)?);
        let response = client
            .get::<_, Vec<Task>>(&path, (), options)
            .await
            .context(format!("listing tasks in section {}", self.id))?;
        Ok(response.into_page())
    }
}
