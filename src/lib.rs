//! # Specwright
//!
//! Step-by-step project workflow wizard - from idea to specification, plan
//! and prompts.
//!
//! Specwright walks a project through a short linear flow and hands back
//! text artifacts at each stage. Two flows are supported:
//!
//! - **Greenfield**: describe an idea, write a specification and plan, and
//!   get implementation prompts back.
//! - **Legacy**: point at an existing repository, get an analysis report,
//!   and generate review/issue/test tasks from it.
//!
//! The state machine lives in [`workflow`], text generation behind the
//! [`generate::TextGenerator`] trait (a canned [`generate::MockGenerator`]
//! is bundled), and a small clipboard helper in [`clipboard`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use specwright::{MockGenerator, ProjectType, WorkflowSession};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut session = WorkflowSession::new(Arc::new(MockGenerator::new()));
//! session.set_project_type(ProjectType::Greenfield);
//! session.set_project_idea("a todo app");
//! session.set_specification("...");
//! session.set_plan("...");
//! session.generate_prompts().await;
//! assert_eq!(session.state().prompts.len(), 5);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]

pub mod clipboard;
pub mod generate;
pub mod workflow;

pub use clipboard::{ClipboardBackend, CommandBackend, CopyTarget, CopyTracker};
pub use generate::{GenerateError, MockGenerator, TextGenerator};
pub use workflow::{
    ProjectType, StepInfo, StepStatus, TaskType, WorkflowFacade, WorkflowSession, WorkflowState,
};
