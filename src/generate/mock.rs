//! Canned-text generator that simulates a backend call.

use std::time::Duration;

use async_trait::async_trait;

use super::{GenerateError, TextGenerator};
use crate::workflow::TaskType;

/// Simulated round-trip latency for every generation call.
const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Stub generator returning fixed text after a fixed delay.
///
/// Stands in for a real LLM provider during development and in tests.
/// Never fails.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    /// Create a mock generator with the default ~1.5s latency.
    pub fn new() -> Self {
        Self { delay: DEFAULT_DELAY }
    }

    /// Create a mock generator with a custom latency.
    ///
    /// Tests use `Duration::ZERO` to skip the simulated round trip.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    async fn simulate_delay(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate_prompts(
        &self,
        _plan: &str,
        use_tdd: bool,
    ) -> Result<Vec<String>, GenerateError> {
        self.simulate_delay().await;

        let prefix = if use_tdd { "Using test-driven development, " } else { "" };
        let extra = if use_tdd { "additional " } else { "" };

        Ok(vec![
            format!("```\n{prefix}Prompt 1: Set up the project structure and initialize the repository with the necessary dependencies.\n```"),
            format!("```\n{prefix}Prompt 2: Implement the core data models and basic CRUD operations.\n```"),
            format!("```\n{prefix}Prompt 3: Create the user interface components for the main features.\n```"),
            format!("```\n{prefix}Prompt 4: Implement authentication and authorization functionality.\n```"),
            format!("```\n{prefix}Prompt 5: Add {extra}unit and integration tests for the implemented features.\n```"),
        ])
    }

    async fn generate_code_context(
        &self,
        repository_path: &str,
    ) -> Result<String, GenerateError> {
        self.simulate_delay().await;

        Ok(format!(
            "# Repository Analysis: {repository_path}\n\n\
             ## Project Structure\n\n\
             ```\n\
             /src\n\
             \x20 /api\n\
             \x20   routes.rs\n\
             \x20   handlers.rs\n\
             \x20 /models\n\
             \x20   user.rs\n\
             \x20   product.rs\n\
             \x20 /store\n\
             \x20   session.rs\n\
             \x20   catalog.rs\n\
             \x20 main.rs\n\
             /tests\n\
             \x20 /unit\n\
             \x20   handlers.rs\n\
             \x20 /e2e\n\
             \x20   checkout.rs\n\
             /public\n\
             \x20 favicon.ico\n\
             \x20 index.html\n\
             ```\n\n\
             ## Key Dependencies\n\n\
             - Web framework 3.5\n\
             - ORM 5.0\n\
             - Session store 2.1\n\
             - Test harness 0.34\n\n\
             ## Main Components\n\n\
             - Router: request dispatch and middleware\n\
             - Handlers: request/response logic per route\n\
             - Catalog: product lookup and caching\n\n\
             ## State Management\n\n\
             - Session store: authentication and user profile\n\
             - Catalog store: product data and cart\n\n\
             ## Test Coverage\n\n\
             - Unit tests: 65% coverage\n\
             - E2E tests: Basic flows only"
        ))
    }

    async fn generate_tasks(
        &self,
        _code_context: &str,
        task_type: TaskType,
    ) -> Result<Vec<String>, GenerateError> {
        self.simulate_delay().await;

        Ok(match task_type {
            TaskType::Review => review_tasks(),
            TaskType::Issues => issue_tasks(),
            TaskType::Tests => test_tasks(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn review_tasks() -> Vec<String> {
    vec![
        "## Code Review Issue 1: Handler Structure\n\n\
         The request handlers have grown too large and mix routing, validation and \
         business logic. Consider splitting them into smaller units for better \
         maintainability.\n\n\
         **Suggested Changes:**\n\
         - Extract validation into a dedicated module\n\
         - Move business logic behind a service layer\n\
         - Keep handlers as thin adapters between transport and services"
            .to_string(),
        "## Code Review Issue 2: Type Definitions\n\n\
         Several modules pass loosely structured maps where a typed struct would do. \
         This invites runtime surprises and makes refactoring risky.\n\n\
         **Suggested Changes:**\n\
         - Define structs for all request and response payloads\n\
         - Add explicit return types to public functions\n\
         - Replace string discriminants with enums"
            .to_string(),
        "## Code Review Issue 3: Error Handling\n\n\
         Error handling is inconsistent, particularly around I/O and external calls. \
         Failures surface as unrelated errors far from their origin.\n\n\
         **Suggested Changes:**\n\
         - Adopt a single error type per module boundary\n\
         - Propagate errors with context instead of logging and continuing\n\
         - Surface user-facing failures with actionable messages"
            .to_string(),
    ]
}

fn issue_tasks() -> Vec<String> {
    vec![
        "## Issue: Missing Mobile Responsiveness\n\n\
         **Description:** The UI is not fully responsive on small screens. The \
         navigation and listing views break below tablet width.\n\n\
         **Steps to Reproduce:**\n\
         1. Open the application in a narrow viewport\n\
         2. Navigate to the listing page\n\
         3. Observe layout issues\n\n\
         **Acceptance Criteria:**\n\
         - All pages usable at 320px and up\n\
         - Navigation collapses on small screens\n\
         - Listings reflow based on available width"
            .to_string(),
        "## Issue: Performance Optimization Needed\n\n\
         **Description:** The listing page lags when rendering large result sets, \
         with noticeable jank while scrolling or filtering.\n\n\
         **Steps to Reproduce:**\n\
         1. Navigate to the listing page\n\
         2. Load 50+ items\n\
         3. Scroll or apply filters\n\n\
         **Acceptance Criteria:**\n\
         - Virtualized rendering for large lists\n\
         - Pagination or incremental loading\n\
         - No dropped frames during filtering"
            .to_string(),
        "## Issue: Session Expiration Handling\n\n\
         **Description:** Expired sessions are not handled; users see opaque API \
         errors instead of being sent back to sign in.\n\n\
         **Steps to Reproduce:**\n\
         1. Sign in to the application\n\
         2. Wait for the session to expire\n\
         3. Access a protected route\n\n\
         **Acceptance Criteria:**\n\
         - Token refresh before expiry where possible\n\
         - Expired-session responses detected centrally\n\
         - Redirect to sign-in with a friendly message"
            .to_string(),
    ]
}

fn test_tasks() -> Vec<String> {
    vec![
        "## Missing Test: Authentication Flow\n\n\
         **Description:** Sign-in, sign-out and token refresh lack coverage. This \
         is a critical path that needs thorough testing.\n\n\
         **Test Requirements:**\n\
         - Unit tests for the session store\n\
         - Integration tests for credential validation\n\
         - End-to-end tests for the full flow including refresh\n\
         - Error cases: invalid credentials, network failures"
            .to_string(),
        "## Missing Test: Cart Totals\n\n\
         **Description:** Adding and removing items and computing totals has no \
         dedicated coverage, particularly around discounts.\n\n\
         **Test Requirements:**\n\
         - Unit tests for cart mutations and total calculation\n\
         - Integration tests for cart interactions\n\
         - Edge cases: duplicate items, quantity limits\n\
         - Discount and promotion application"
            .to_string(),
        "## Missing Test: Form Validation\n\n\
         **Description:** Input validation rules are untested, which risks both \
         data integrity and user experience regressions.\n\n\
         **Test Requirements:**\n\
         - Unit tests for validation helpers\n\
         - Tests for every validation rule (required fields, formats)\n\
         - Error message display and submit gating"
            .to_string(),
    ]
}
