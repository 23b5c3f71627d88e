//! Workflow state and step metadata.
//!
//! Defines the session-lifetime state record and the small enums that
//! select which flow is active.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which kind of project the wizard is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// New project from scratch: idea -> specification -> plan -> prompts.
    Greenfield,
    /// Existing codebase: repository context -> task type -> generated tasks.
    Legacy,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greenfield => write!(f, "greenfield"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for ProjectType {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greenfield" => Ok(Self::Greenfield),
            "legacy" => Ok(Self::Legacy),
            other => Err(ParseVariantError { kind: "project type", value: other.to_string() }),
        }
    }
}

/// What kind of tasks to generate for a legacy codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Code review findings.
    Review,
    /// Issue reports.
    Issues,
    /// Missing test descriptions.
    Tests,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Review => write!(f, "review"),
            Self::Issues => write!(f, "issues"),
            Self::Tests => write!(f, "tests"),
        }
    }
}

impl FromStr for TaskType {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "review" => Ok(Self::Review),
            "issues" => Ok(Self::Issues),
            "tests" => Ok(Self::Tests),
            other => Err(ParseVariantError { kind: "task type", value: other.to_string() }),
        }
    }
}

/// Error returned when a flow or task type string is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized {kind}: {value}")]
pub struct ParseVariantError {
    kind: &'static str,
    value: String,
}

/// Position of a step relative to the step pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One entry in the annotated step list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// 1-based step number
    pub number: u32,

    /// Human-readable step name
    pub name: String,

    /// Position relative to the current step
    pub status: StepStatus,
}

/// Step names for the greenfield flow, in order.
pub(crate) const GREENFIELD_STEPS: &[&str] =
    &["Project Type", "Project Idea", "Specification", "Plan", "TODO", "Prompts"];

/// Step names for the legacy flow, in order.
pub(crate) const LEGACY_STEPS: &[&str] =
    &["Project Type", "Repository Context", "Task Type", "Generated Tasks"];

/// Fallback before a project type has been chosen.
pub(crate) const UNSET_STEPS: &[&str] = &["Project Type"];

/// Step name table for a (possibly unset) project type.
pub(crate) fn step_names(project_type: Option<ProjectType>) -> &'static [&'static str] {
    match project_type {
        Some(ProjectType::Greenfield) => GREENFIELD_STEPS,
        Some(ProjectType::Legacy) => LEGACY_STEPS,
        None => UNSET_STEPS,
    }
}

/// The wizard's session state.
///
/// One instance per session, created with all defaults and mutated only
/// through [`WorkflowSession`](super::WorkflowSession) actions. Exactly one
/// of the two artifact families (greenfield vs legacy) is populated per
/// session; the other keeps its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// 1-based pointer into the active flow's step sequence
    pub current_step: u32,

    /// Selected flow; `None` until the user picks one
    pub project_type: Option<ProjectType>,

    /// Greenfield: the project idea text
    pub project_idea: String,

    /// Greenfield: whether prompts should follow test-driven development
    pub use_tdd: bool,

    /// Greenfield: specification text
    pub specification: String,

    /// Greenfield: implementation plan text
    pub plan: String,

    /// Greenfield: TODO list text
    pub todo_list: String,

    /// Greenfield: generated implementation prompts
    pub prompts: Vec<String>,

    /// True while a generation call is in flight
    pub is_loading: bool,

    /// Legacy: generated repository analysis
    pub code_context: String,

    /// Legacy: which kind of tasks to generate
    pub selected_task_type: Option<TaskType>,

    /// Legacy: generated task descriptions
    pub generated_tasks: Vec<String>,

    /// Legacy: path to the repository under review
    pub repository_path: String,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            current_step: 1,
            project_type: None,
            project_idea: String::new(),
            use_tdd: false,
            specification: String::new(),
            plan: String::new(),
            todo_list: String::new(),
            prompts: Vec::new(),
            is_loading: false,
            code_context: String::new(),
            selected_task_type: None,
            generated_tasks: Vec::new(),
            repository_path: String::new(),
        }
    }
}

impl WorkflowState {
    /// Number of steps in the active flow.
    ///
    /// 6 for greenfield, 4 for legacy, 1 while no project type is chosen.
    pub fn max_steps(&self) -> u32 {
        step_names(self.project_type).len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = WorkflowState::default();
        assert_eq!(state.current_step, 1);
        assert_eq!(state.project_type, None);
        assert!(state.prompts.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_max_steps_per_flow() {
        let mut state = WorkflowState::default();
        assert_eq!(state.max_steps(), 1);

        state.project_type = Some(ProjectType::Greenfield);
        assert_eq!(state.max_steps(), 6);

        state.project_type = Some(ProjectType::Legacy);
        assert_eq!(state.max_steps(), 4);
    }

    #[test]
    fn test_project_type_round_trip() {
        assert_eq!("greenfield".parse::<ProjectType>().unwrap(), ProjectType::Greenfield);
        assert_eq!("Legacy".parse::<ProjectType>().unwrap(), ProjectType::Legacy);
        assert!("brownfield".parse::<ProjectType>().is_err());
        assert_eq!(ProjectType::Greenfield.to_string(), "greenfield");
    }

    #[test]
    fn test_task_type_parse() {
        assert_eq!("issues".parse::<TaskType>().unwrap(), TaskType::Issues);
        assert_eq!("REVIEW".parse::<TaskType>().unwrap(), TaskType::Review);
        assert!("docs".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_step_status_serializes_lowercase() {
        let json = serde_json::to_string(&StepStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
