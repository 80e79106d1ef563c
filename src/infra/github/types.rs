//! Repository payloads exchanged with the GitHub REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Repository owner (user or organization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A repository as returned by the API.
///
/// Only the fields this tool reads are typed; everything else is kept in
/// `extra` so serializing the value reproduces the server payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    pub fn full_name(&self) -> String {
        match self.extra.get("full_name").and_then(Value::as_str) {
            Some(full_name) => full_name.to_string(),
            None => match &self.owner {
                Some(owner) => format!("{}/{}", owner.login, self.name),
                None => self.name.clone(),
            },
        }
    }

    pub fn html_url(&self) -> Option<&str> {
        self.extra.get("html_url").and_then(Value::as_str)
    }

    pub fn is_private(&self) -> bool {
        self.extra
            .get("private")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the repository was created by this tool, i.e. its description
    /// carries the project tag.
    pub fn is_managed(&self, project_tag: &str) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| d.contains(project_tag))
    }
}

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewRepository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// Body of `PATCH /repos/{owner}/{repo}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl RepositoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
