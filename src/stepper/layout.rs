//! Declarative stepper layouts loaded from TOML.
//!
//! A layout lists the stepper's children, each tagged with its role:
//!
//! ```toml
//! initial_step = 0
//!
//! [[children]]
//! role = "indicators"
//! labels = ["Todo", "In Progress", "Review"]
//!
//! [[children]]
//! role = "step_list"
//! steps = [{ title = "Todo", body = "1" }]
//!
//! [[children]]
//! role = "actions"
//! previous = "Previous"
//! next = "Next"
//! last = "Finish"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a layout file
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("failed to read layout '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperLayout {
    /// Overrides the configured initial step when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_step: Option<i64>,
    #[serde(default)]
    pub children: Vec<ChildDescriptor>,
}

/// One child of the stepper, identified by its role tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChildDescriptor {
    Indicators {
        labels: Vec<String>,
    },
    StepList {
        steps: Vec<StepDescriptor>,
    },
    Actions {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        last: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl StepperLayout {
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Number of panels across all step lists
    pub fn step_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                ChildDescriptor::StepList { steps } => steps.len(),
                _ => 0,
            })
            .sum()
    }
}

impl Default for StepperLayout {
    fn default() -> Self {
        let labels = ["Todo", "In Progress", "Review"];
        Self {
            initial_step: None,
            children: vec![
                ChildDescriptor::Indicators {
                    labels: labels.iter().map(ToString::to_string).collect(),
                },
                ChildDescriptor::StepList {
                    steps: labels
                        .iter()
                        .enumerate()
                        .map(|(i, label)| StepDescriptor {
                            title: (*label).to_string(),
                            body: (i + 1).to_string(),
                        })
                        .collect(),
                },
                ChildDescriptor::Actions {
                    previous: Some("Previous".to_string()),
                    next: Some("Next".to_string()),
                    last: Some("Finish".to_string()),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
initial_step = 1

[[children]]
role = "actions"
next = "Continue"

[[children]]
role = "step_list"
steps = [
  { title = "One", body = "first" },
  { title = "Two" },
]

[[children]]
role = "indicators"
labels = ["One", "Two"]
"#;

    #[test]
    fn test_parse_role_tagged_children_in_any_order() {
        let layout = StepperLayout::from_toml_str(SAMPLE).unwrap();
        assert_eq!(layout.initial_step, Some(1));
        assert_eq!(layout.children.len(), 3);
        assert_eq!(
            layout.children[0],
            ChildDescriptor::Actions {
                previous: None,
                next: Some("Continue".to_string()),
                last: None,
            }
        );
        assert_eq!(layout.step_count(), 2);
        match &layout.children[1] {
            ChildDescriptor::StepList { steps } => assert_eq!(steps[1].body, ""),
            other => panic!("expected step list, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = StepperLayout::from_toml_str("[[children]]\nrole = \"sidebar\"\n").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_default_layout_roundtrips_through_toml() {
        let layout = StepperLayout::default();
        let text = layout.to_toml_string().unwrap();
        assert!(text.contains("role = \"indicators\""));
        assert_eq!(StepperLayout::from_toml_str(&text).unwrap(), layout);
    }

    #[test]
    fn test_default_layout_has_three_steps() {
        assert_eq!(StepperLayout::default().step_count(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let layout = StepperLayout::load(file.path()).unwrap();
        assert_eq!(layout.step_count(), 2);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = StepperLayout::load(Path::new("/nonexistent/layout.toml")).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/layout.toml"));
    }
}
