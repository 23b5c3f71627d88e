//! Step-workflow state machine.
//!
//! Two linear flows share one state record:
//!
//! - **Greenfield** (6 steps): Project Type -> Project Idea ->
//!   Specification -> Plan -> TODO -> Prompts
//! - **Legacy** (4 steps): Project Type -> Repository Context ->
//!   Task Type -> Generated Tasks
//!
//! Artifact setters store a value and advance the step pointer; derived
//! queries recompute the annotated step list and advance-eligibility on
//! every read. Generation actions go through the injected
//! [`TextGenerator`](crate::generate::TextGenerator).

mod facade;
mod session;
mod state;

pub use facade::WorkflowFacade;
pub use session::WorkflowSession;
pub use state::{ParseVariantError, ProjectType, StepInfo, StepStatus, TaskType, WorkflowState};
