// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Domain actions
// depend on these seams so tests can swap in the mocks from
// test_dependencies.rs.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send a single HTML email.
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}
