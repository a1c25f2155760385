use async_trait::async_trait;
use tracing::info;

use crate::{email_client, templ_manager::TemplateManager, web::types::ValidEmail, EmailClient};

pub const WELCOME_SUBJECT: &str = "Welcome to Rhetix 👋";

/// Outbound welcome notification for new waitlist entries.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_welcome(&self, recipient: &ValidEmail) -> Result<()>;
}

/// Sends the welcome email through the transactional email provider.
#[derive(Debug)]
pub struct EmailNotifier {
    email_client: EmailClient,
    templ_mgr: TemplateManager,
}

impl EmailNotifier {
    pub fn new(email_client: EmailClient, templ_mgr: TemplateManager) -> Self {
        Self {
            email_client,
            templ_mgr,
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    #[tracing::instrument(name = "Sending welcome email", skip_all)]
    async fn send_welcome(&self, recipient: &ValidEmail) -> Result<()> {
        let rendered = self.templ_mgr.render_welcome(recipient)?;

        self.email_client
            .send_email(
                recipient,
                WELCOME_SUBJECT,
                rendered.html.as_str(),
                rendered.text.as_str(),
            )
            .await?;

        info!("SUCCESS");
        Ok(())
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, NotifyError>;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("template render error: {0}")]
    Template(#[from] tera::Error),
    #[error("email client error: {0}")]
    EmailClient(#[from] email_client::Error),
}
