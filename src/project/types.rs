/// Project type definitions
///
/// A project is a user-visible unit of work, either a text document or a slide deck.

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use std::fmt;
use std::str::FromStr;

/// Kind of project, stored in the `type` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Document,
    Slides,
}

impl ProjectType {
    /// Value stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Document => "document",
            ProjectType::Slides => "slides",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized project type '{0}'")]
pub struct ParseProjectTypeError(pub String);

impl FromStr for ProjectType {
    type Err = ParseProjectTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(ProjectType::Document),
            "slides" => Ok(ProjectType::Slides),
            other => Err(ParseProjectTypeError(other.to_string())),
        }
    }
}

/// A stored project row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Auto-assigned row id
    pub id: i64,
    /// Display name, never empty
    pub name: String,
    /// Document or slides
    #[serde(rename = "type")]
    pub kind: ProjectType,
    /// Free-form description, empty when not given
    pub description: String,
    /// Insertion time (`YYYY-MM-DD HH:MM:SS`, UTC)
    pub created_at: String,
    /// Equal to `created_at`; no update operation exists
    pub updated_at: String,
}

impl<'r> FromRow<'r, SqliteRow> for Project {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("type")?;
        let kind = kind.parse::<ProjectType>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "type".to_string(),
            source: Box::new(e),
        })?;

        Ok(Project {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            kind,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Request payload for project creation
///
/// `type` stays a plain string: the database CHECK constraint decides validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_kind() -> String {
    ProjectType::default().as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!("document".parse::<ProjectType>().unwrap(), ProjectType::Document);
        assert_eq!("slides".parse::<ProjectType>().unwrap(), ProjectType::Slides);
        assert!("Slides".parse::<ProjectType>().is_err());
    }

    #[test]
    fn project_serializes_kind_as_type() {
        let project = Project {
            id: 7,
            name: "Demo".to_string(),
            kind: ProjectType::Slides,
            description: String::new(),
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "slides");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn new_project_defaults() {
        let req: NewProject = serde_json::from_str(r#"{"name":"Plan"}"#).unwrap();
        assert_eq!(req.kind, "document");
        assert_eq!(req.description, None);
    }
}
