//! Presentation-facing surface of the wizard.

use super::session::WorkflowSession;
use super::state::{ProjectType, StepInfo};

/// Thin read/write projection of a [`WorkflowSession`].
///
/// Exposes exactly what presentation code needs for the greenfield path
/// and nothing else; every call delegates to the session with no added
/// behavior.
pub struct WorkflowFacade<'a> {
    session: &'a mut WorkflowSession,
}

impl<'a> WorkflowFacade<'a> {
    pub(crate) fn new(session: &'a mut WorkflowSession) -> Self {
        Self { session }
    }

    // Reads

    pub fn current_step(&self) -> u32 {
        self.session.state().current_step
    }

    pub fn project_type(&self) -> Option<ProjectType> {
        self.session.state().project_type
    }

    pub fn project_idea(&self) -> &str {
        &self.session.state().project_idea
    }

    pub fn use_tdd(&self) -> bool {
        self.session.state().use_tdd
    }

    pub fn specification(&self) -> &str {
        &self.session.state().specification
    }

    pub fn plan(&self) -> &str {
        &self.session.state().plan
    }

    pub fn prompts(&self) -> &[String] {
        &self.session.state().prompts
    }

    pub fn is_loading(&self) -> bool {
        self.session.state().is_loading
    }

    // Writes

    pub fn set_project_type(&mut self, project_type: ProjectType) {
        self.session.set_project_type(project_type);
    }

    pub fn set_project_idea(&mut self, idea: impl Into<String>) {
        self.session.set_project_idea(idea);
    }

    pub fn set_tdd(&mut self, use_tdd: bool) {
        self.session.set_tdd(use_tdd);
    }

    pub fn set_specification(&mut self, specification: impl Into<String>) {
        self.session.set_specification(specification);
    }

    pub fn set_plan(&mut self, plan: impl Into<String>) {
        self.session.set_plan(plan);
    }

    pub fn set_prompts(&mut self, prompts: Vec<String>) {
        self.session.set_prompts(prompts);
    }

    pub fn advance_step(&mut self) {
        self.session.advance_step();
    }

    pub fn go_to_step(&mut self, step: u32) {
        self.session.go_to_step(step);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub async fn generate_prompts(&mut self) {
        self.session.generate_prompts().await;
    }

    // Derived

    pub fn steps(&self) -> Vec<StepInfo> {
        self.session.steps()
    }

    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::generate::MockGenerator;
    use crate::workflow::{ProjectType, StepStatus, WorkflowSession};

    #[tokio::test]
    async fn test_facade_mirrors_session() {
        let mut session =
            WorkflowSession::new(Arc::new(MockGenerator::with_delay(Duration::ZERO)));
        let mut facade = session.facade();

        facade.set_project_type(ProjectType::Greenfield);
        facade.set_project_idea("idea");
        facade.set_tdd(true);
        facade.set_specification("spec");
        facade.set_plan("plan");

        assert_eq!(facade.current_step(), 5);
        assert_eq!(facade.plan(), "plan");
        assert!(facade.use_tdd());
        assert!(facade.can_advance());

        facade.generate_prompts().await;
        assert_eq!(facade.prompts().len(), 5);
        assert!(!facade.is_loading());

        facade.go_to_step(2);
        assert_eq!(facade.steps()[1].status, StepStatus::Current);

        facade.reset();
        assert_eq!(facade.current_step(), 1);
        assert_eq!(facade.project_type(), None);
    }
}
