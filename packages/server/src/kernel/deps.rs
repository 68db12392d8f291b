//! Server dependencies for domain actions (using traits for testability)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sendgrid::models::{MailAddress, MailMessage};
use sendgrid::SendGridService;

use crate::data::Store;
use crate::html::Templates;
use crate::kernel::BaseMailer;

// =============================================================================
// SendGridService Adapter (implements BaseMailer trait)
// =============================================================================

/// Wrapper around SendGridService that implements the BaseMailer trait.
/// Carries the fixed sender identity for every outbound message.
pub struct SendGridAdapter {
    service: Arc<SendGridService>,
    from: MailAddress,
}

impl SendGridAdapter {
    pub fn new(service: Arc<SendGridService>, from: MailAddress) -> Self {
        Self { service, from }
    }
}

#[async_trait]
impl BaseMailer for SendGridAdapter {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let message = MailMessage::single(
            self.from.clone(),
            subject,
            MailAddress::new(to, to),
            html_body,
        );
        self.service
            .send(&message)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Store,
    pub templates: Arc<Templates>,
    pub mailer: Arc<dyn BaseMailer>,
    /// External base URL used to build confirmation links.
    pub base_url: String,
}

impl ServerDeps {
    pub fn new(
        store: Store,
        templates: Arc<Templates>,
        mailer: Arc<dyn BaseMailer>,
        base_url: String,
    ) -> Self {
        Self {
            store,
            templates,
            mailer,
            base_url,
        }
    }
}
