//! Text generation for workflow artifacts.
//!
//! The wizard never talks to a backend directly; it goes through the
//! [`TextGenerator`] capability so a real LLM provider can be substituted
//! without touching the state machine. The bundled [`MockGenerator`]
//! resolves canned text after a fixed delay and never fails.

mod mock;

pub use mock::MockGenerator;

use async_trait::async_trait;

use crate::workflow::TaskType;

/// Trait for artifact text generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate implementation prompts from a plan.
    ///
    /// Returns five fenced prompt blocks. When `use_tdd` is set, each
    /// prompt carries a test-driven-development prefix.
    async fn generate_prompts(
        &self,
        plan: &str,
        use_tdd: bool,
    ) -> Result<Vec<String>, GenerateError>;

    /// Generate a repository analysis report for a path.
    async fn generate_code_context(&self, repository_path: &str)
        -> Result<String, GenerateError>;

    /// Generate task descriptions for a legacy codebase.
    async fn generate_tasks(
        &self,
        code_context: &str,
        task_type: TaskType,
    ) -> Result<Vec<String>, GenerateError>;

    /// Get the generator name.
    fn name(&self) -> &str;
}

/// Generation error types.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Generator not available: {0}")]
    NotAvailable(String),

    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("No response from generator")]
    NoResponse,
}
