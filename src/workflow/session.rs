//! The workflow state machine.
//!
//! A [`WorkflowSession`] owns one [`WorkflowState`] record plus the
//! injected [`TextGenerator`] and exposes the named actions that mutate
//! it. There is no ambient global; callers construct a session and pass
//! it to whatever layer needs it, so tests and concurrent sessions never
//! share state.

use std::sync::Arc;

use super::facade::WorkflowFacade;
use super::state::{step_names, ProjectType, StepInfo, StepStatus, TaskType, WorkflowState};
use crate::generate::{MockGenerator, TextGenerator};

/// One user's trip through the wizard.
pub struct WorkflowSession {
    state: WorkflowState,
    generator: Arc<dyn TextGenerator>,
}

impl WorkflowSession {
    /// Create a session backed by the given generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { state: WorkflowState::default(), generator }
    }

    /// Read access to the full state record.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The thin read/write surface handed to presentation code.
    pub fn facade(&mut self) -> WorkflowFacade<'_> {
        WorkflowFacade::new(self)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Pick the flow and move to its first input step.
    pub fn set_project_type(&mut self, project_type: ProjectType) {
        self.state.project_type = Some(project_type);
        self.advance_step();
    }

    pub fn set_project_idea(&mut self, idea: impl Into<String>) {
        self.state.project_idea = idea.into();
        self.advance_step();
    }

    /// Toggle test-driven prompts. Does not move the step pointer.
    pub fn set_tdd(&mut self, use_tdd: bool) {
        self.state.use_tdd = use_tdd;
    }

    pub fn set_specification(&mut self, specification: impl Into<String>) {
        self.state.specification = specification.into();
        self.advance_step();
    }

    pub fn set_plan(&mut self, plan: impl Into<String>) {
        self.state.plan = plan.into();
        self.advance_step();
    }

    pub fn set_todo_list(&mut self, todo_list: impl Into<String>) {
        self.state.todo_list = todo_list.into();
        self.advance_step();
    }

    pub fn set_prompts(&mut self, prompts: Vec<String>) {
        self.state.prompts = prompts;
        self.advance_step();
    }

    /// Record the repository path. Does not move the step pointer.
    pub fn set_repository_path(&mut self, path: impl Into<String>) {
        self.state.repository_path = path.into();
    }

    pub fn set_code_context(&mut self, context: impl Into<String>) {
        self.state.code_context = context.into();
        self.advance_step();
    }

    pub fn set_selected_task_type(&mut self, task_type: TaskType) {
        self.state.selected_task_type = Some(task_type);
        self.advance_step();
    }

    pub fn set_generated_tasks(&mut self, tasks: Vec<String>) {
        self.state.generated_tasks = tasks;
        self.advance_step();
    }

    /// Move the step pointer forward by one; holds at the final step.
    pub fn advance_step(&mut self) {
        if self.state.current_step < self.state.max_steps() {
            self.state.current_step += 1;
        }
    }

    /// Jump directly to a step. Out-of-range values are ignored.
    pub fn go_to_step(&mut self, step: u32) {
        if step >= 1 && step <= self.state.max_steps() {
            self.state.current_step = step;
        }
    }

    /// Restore every field to its default, including the step pointer.
    pub fn reset(&mut self) {
        self.state = WorkflowState::default();
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Generate implementation prompts from the stored plan.
    ///
    /// No-op when the plan is empty or a generation call is already in
    /// flight. Failures are logged and swallowed; the prompts field is
    /// left unchanged and `is_loading` always ends up false.
    pub async fn generate_prompts(&mut self) {
        if self.state.plan.is_empty() {
            return;
        }
        if !self.begin_generation() {
            return;
        }

        match self.generator.generate_prompts(&self.state.plan, self.state.use_tdd).await {
            Ok(prompts) => self.state.prompts = prompts,
            Err(e) => {
                tracing::warn!(generator = self.generator.name(), error = %e, "Prompt generation failed");
            }
        }
        self.state.is_loading = false;
    }

    /// Generate the repository analysis from the stored repository path.
    pub async fn generate_code_context(&mut self) {
        if self.state.repository_path.is_empty() {
            return;
        }
        if !self.begin_generation() {
            return;
        }

        match self.generator.generate_code_context(&self.state.repository_path).await {
            Ok(context) => self.state.code_context = context,
            Err(e) => {
                tracing::warn!(generator = self.generator.name(), error = %e, "Context generation failed");
            }
        }
        self.state.is_loading = false;
    }

    /// Generate task descriptions from the stored context and task type.
    pub async fn generate_tasks(&mut self) {
        let Some(task_type) = self.state.selected_task_type else {
            return;
        };
        if self.state.code_context.is_empty() {
            return;
        }
        if !self.begin_generation() {
            return;
        }

        match self.generator.generate_tasks(&self.state.code_context, task_type).await {
            Ok(tasks) => self.state.generated_tasks = tasks,
            Err(e) => {
                tracing::warn!(generator = self.generator.name(), error = %e, "Task generation failed");
            }
        }
        self.state.is_loading = false;
    }

    /// Single-flight guard: claims the loading flag, or reports that a
    /// generation call is already pending.
    fn begin_generation(&mut self) -> bool {
        if self.state.is_loading {
            tracing::debug!(generator = self.generator.name(), "Generation already in flight");
            return false;
        }
        self.state.is_loading = true;
        true
    }

    // ------------------------------------------------------------------
    // Derived queries
    // ------------------------------------------------------------------

    /// The active flow's step list, annotated against the step pointer.
    pub fn steps(&self) -> Vec<StepInfo> {
        step_names(self.state.project_type)
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let number = i as u32 + 1;
                let status = if number < self.state.current_step {
                    StepStatus::Completed
                } else if number == self.state.current_step {
                    StepStatus::Current
                } else {
                    StepStatus::Upcoming
                };
                StepInfo { number, name: (*name).to_string(), status }
            })
            .collect()
    }

    /// Number of steps in the active flow.
    pub fn max_steps(&self) -> u32 {
        self.state.max_steps()
    }

    /// Whether the current step's required input is present.
    pub fn can_advance(&self) -> bool {
        match self.state.project_type {
            Some(ProjectType::Greenfield) => match self.state.current_step {
                1 => true,
                2 => !self.state.project_idea.is_empty(),
                3 => !self.state.specification.is_empty(),
                4 => !self.state.plan.is_empty(),
                // The TODO step never blocks
                5 => true,
                _ => false,
            },
            Some(ProjectType::Legacy) => match self.state.current_step {
                1 => true,
                2 => !self.state.code_context.is_empty(),
                3 => self.state.selected_task_type.is_some(),
                _ => false,
            },
            None => false,
        }
    }

    pub fn is_greenfield_flow(&self) -> bool {
        self.state.project_type == Some(ProjectType::Greenfield)
    }

    pub fn is_legacy_flow(&self) -> bool {
        self.state.project_type == Some(ProjectType::Legacy)
    }
}

impl Default for WorkflowSession {
    /// Session backed by the bundled mock generator.
    fn default() -> Self {
        Self::new(Arc::new(MockGenerator::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::generate::GenerateError;

    fn session() -> WorkflowSession {
        WorkflowSession::new(Arc::new(MockGenerator::with_delay(Duration::ZERO)))
    }

    /// Generator that always fails, for failure-path tests.
    struct FailingGenerator;

    #[async_trait::async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate_prompts(
            &self,
            _plan: &str,
            _use_tdd: bool,
        ) -> Result<Vec<String>, GenerateError> {
            Err(GenerateError::NoResponse)
        }

        async fn generate_code_context(
            &self,
            _repository_path: &str,
        ) -> Result<String, GenerateError> {
            Err(GenerateError::NoResponse)
        }

        async fn generate_tasks(
            &self,
            _code_context: &str,
            _task_type: TaskType,
        ) -> Result<Vec<String>, GenerateError> {
            Err(GenerateError::NoResponse)
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_setters_advance_step() {
        let mut s = session();
        assert_eq!(s.state().current_step, 1);

        s.set_project_type(ProjectType::Greenfield);
        assert_eq!(s.state().current_step, 2);

        s.set_project_idea("a todo app");
        assert_eq!(s.state().current_step, 3);

        s.set_specification("spec");
        s.set_plan("plan");
        s.set_todo_list("todo");
        assert_eq!(s.state().current_step, 6);

        // Terminal step holds
        s.set_prompts(vec!["p".to_string()]);
        assert_eq!(s.state().current_step, 6);
    }

    #[test]
    fn test_tdd_and_repository_path_do_not_advance() {
        let mut s = session();
        s.set_tdd(true);
        s.set_repository_path("/repo");
        assert_eq!(s.state().current_step, 1);
        assert!(s.state().use_tdd);
        assert_eq!(s.state().repository_path, "/repo");
    }

    #[test]
    fn test_advance_clamped_when_type_unset() {
        let mut s = session();
        s.advance_step();
        s.advance_step();
        assert_eq!(s.state().current_step, 1);
    }

    #[test]
    fn test_go_to_step_rejects_out_of_range() {
        let mut s = session();
        s.set_project_type(ProjectType::Legacy);
        s.go_to_step(4);
        assert_eq!(s.state().current_step, 4);

        s.go_to_step(0);
        assert_eq!(s.state().current_step, 4);
        s.go_to_step(5);
        assert_eq!(s.state().current_step, 4);

        s.go_to_step(1);
        assert_eq!(s.state().current_step, 1);
    }

    #[test]
    fn test_step_pointer_stays_in_range_after_every_action() {
        let mut s = session();
        s.set_project_type(ProjectType::Legacy);
        s.set_code_context("ctx");
        s.set_selected_task_type(TaskType::Review);
        s.set_generated_tasks(vec!["t".to_string()]);
        s.set_generated_tasks(vec!["t".to_string()]);
        assert!(s.state().current_step >= 1);
        assert!(s.state().current_step <= s.max_steps());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut s = session();
        s.set_project_type(ProjectType::Greenfield);
        s.set_project_idea("idea");
        s.set_tdd(true);
        s.set_plan("plan");

        s.reset();
        assert_eq!(*s.state(), WorkflowState::default());
    }

    #[test]
    fn test_steps_annotation() {
        let mut s = session();
        let steps = s.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].status, StepStatus::Current);

        s.set_project_type(ProjectType::Greenfield);
        let steps = s.steps();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].name, "Project Type");
        assert_eq!(steps[0].status, StepStatus::Completed);
        assert_eq!(steps[1].status, StepStatus::Current);
        assert!(steps[2..].iter().all(|step| step.status == StepStatus::Upcoming));
    }

    #[test]
    fn test_can_advance_greenfield_table() {
        let mut s = session();
        assert!(!s.can_advance());

        s.set_project_type(ProjectType::Greenfield);
        // Step 2: project idea required
        assert!(!s.can_advance());
        s.set_project_idea("idea");
        // Step 3: specification required
        assert!(!s.can_advance());
        s.set_specification("spec");
        assert!(!s.can_advance());
        s.set_plan("plan");
        // Step 5 (TODO) always allows advancing
        assert!(s.can_advance());
        s.set_todo_list("todo");
        // Step 6 is terminal
        assert!(!s.can_advance());
    }

    #[test]
    fn test_can_advance_legacy_table() {
        let mut s = session();
        s.set_project_type(ProjectType::Legacy);
        assert!(!s.can_advance());
        s.set_code_context("ctx");
        assert!(!s.can_advance());
        s.set_selected_task_type(TaskType::Issues);
        assert!(!s.can_advance());
        assert!(s.is_legacy_flow());
        assert!(!s.is_greenfield_flow());
    }

    #[tokio::test]
    async fn test_generate_prompts_populates_field() {
        let mut s = session();
        s.set_project_type(ProjectType::Greenfield);
        s.set_plan("do X");
        let step_before = s.state().current_step;

        s.generate_prompts().await;

        assert_eq!(s.state().prompts.len(), 5);
        assert!(s.state().prompts.iter().all(|p| p.contains("Prompt ")));
        assert!(!s.state().is_loading);
        // Generation stores the result directly; the pointer stays put
        assert_eq!(s.state().current_step, step_before);
    }

    #[tokio::test]
    async fn test_generate_prompts_respects_tdd_flag() {
        let mut s = session();
        s.set_project_type(ProjectType::Greenfield);
        s.set_tdd(true);
        s.set_plan("do X");

        s.generate_prompts().await;

        assert!(s
            .state()
            .prompts
            .iter()
            .all(|p| p.contains("Using test-driven development, ")));
    }

    #[tokio::test]
    async fn test_generate_prompts_noop_without_plan() {
        let mut s = session();
        s.set_project_type(ProjectType::Greenfield);

        s.generate_prompts().await;

        assert!(s.state().prompts.is_empty());
        assert!(!s.state().is_loading);
        assert_eq!(s.state().current_step, 2);
    }

    #[tokio::test]
    async fn test_generate_code_context_noop_without_path() {
        let mut s = session();
        s.set_project_type(ProjectType::Legacy);

        s.generate_code_context().await;

        assert!(s.state().code_context.is_empty());
        assert!(!s.state().is_loading);
    }

    #[tokio::test]
    async fn test_generate_tasks_requires_context_and_type() {
        let mut s = session();
        s.set_project_type(ProjectType::Legacy);
        s.set_selected_task_type(TaskType::Issues);

        // Context missing
        s.generate_tasks().await;
        assert!(s.state().generated_tasks.is_empty());

        s.set_code_context("ctx");
        s.generate_tasks().await;
        assert_eq!(s.state().generated_tasks.len(), 3);
        assert!(s.state().generated_tasks.iter().all(|t| t.contains("## Issue:")));
        assert!(!s.state().is_loading);
    }

    #[tokio::test]
    async fn test_generation_failure_is_swallowed() {
        let mut s = WorkflowSession::new(Arc::new(FailingGenerator));
        s.set_project_type(ProjectType::Greenfield);
        s.set_plan("plan");

        s.generate_prompts().await;

        assert!(s.state().prompts.is_empty());
        assert!(!s.state().is_loading);
    }

    #[tokio::test]
    async fn test_generation_rejected_while_loading() {
        let mut s = session();
        s.set_project_type(ProjectType::Greenfield);
        s.set_plan("plan");

        // Simulate a pending call claiming the flag
        assert!(s.begin_generation());
        s.generate_prompts().await;
        assert!(s.state().prompts.is_empty());
        assert!(s.state().is_loading);

        s.state.is_loading = false;
        s.generate_prompts().await;
        assert_eq!(s.state().prompts.len(), 5);
    }
}
