use super::{segment, FieldSet};
use crate::{Client, Options, Result, ResultExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One choice of an enum custom field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValue {
    #[serde(rename = "gid")]
    pub id: String,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub color: Option<String>,
}

/// A custom field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The name of the field.
    pub name: Option<String>,
    /// When the field was created.
    pub created_at: Option<DateTime<Utc>>,
    /// `text`, `enum` or `number`.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    /// The choices of an enum field.
    pub enum_options: Vec<EnumValue>,
    /// Decimal places shown for a number field.
    pub precision: Option<u32>,
}

impl FieldSet for CustomField {
    const FIELDS: &'static [&'static str] = &[
        "gid",
        "name",
        "created_at",
        "type",
        "enum_options",
        "precision",
    ];
}

/// A custom field together with its value on a task or project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFieldValue {
    #[serde(flatten)]
    pub field: CustomField,
    pub text_value: Option<String>,
    pub number_value: Option<f64>,
    pub enum_value: Option<EnumValue>,
}

/// The association of a custom field with a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFieldSetting {
    #[serde(rename = "gid")]
    pub id: String,
    pub custom_field: Option<CustomField>,
    pub is_important: Option<bool>,
}

impl CustomField {
    /// Loads the full record.
    pub async fn fetch(&self, client: &Client, options: &[Options]) -> Result<CustomField> {
        tracing::trace!(custom_field = %self.id, "Loading custom field details");
        let path = format!("/custom_fields/{}", segment("custom field", &self.id)?);
        let response = client
            .get::<_, CustomField>(&path, (), options)
            .await
            .context(format!("fetching custom field {}", self.id))?;
        Ok(response.data)
    }
}
