use super::FieldSet;
use crate::Validate;
use serde::{Deserialize, Serialize};

/// A collection of projects tracked together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    /// Globally unique id.
    #[serde(rename = "gid")]
    pub id: String,
    /// The name of the portfolio.
    pub name: Option<String>,
}

impl FieldSet for Portfolio {
    const FIELDS: &'static [&'static str] = &["gid", "name"];
}

/// Portfolios can only be listed per workspace and owner.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PortfolioQuery<'a> {
    workspace: &'a str,
    owner: &'static str,
}

impl Validate for PortfolioQuery<'_> {}

impl Portfolio {
    pub(crate) fn query(workspace: &str) -> PortfolioQuery<'_> {
        PortfolioQuery {
            workspace,
            owner: "me",
        }
    }
}
