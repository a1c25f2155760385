use tera::{Context, Tera};
use tracing::info;

use crate::web::types::ValidEmail;

pub const WELCOME_HTML: &str = "welcome_email.html";
pub const WELCOME_TEXT: &str = "welcome_email.txt";

/// Holds the parsed email templates.
/// Templates are embedded in the binary so it doesn't depend on the working directory.
#[derive(Debug)]
pub struct TemplateManager {
    tera: Tera,
}

/// Both renditions of the welcome email.
#[derive(Debug)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

impl TemplateManager {
    pub fn init() -> Result<Self, tera::Error> {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        let mut tera = Tera::default();
        tera.add_raw_templates([
            (
                WELCOME_HTML,
                include_str!("../templates/welcome_email.html"),
            ),
            (WELCOME_TEXT, include_str!("../templates/welcome_email.txt")),
        ])?;

        Ok(Self { tera })
    }

    /// Renders the welcome email, the recipient is the only template parameter.
    pub fn render_welcome(&self, recipient: &ValidEmail) -> Result<RenderedEmail, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("recipient", recipient.as_ref());

        let html = self.tera.render(WELCOME_HTML, &ctx)?;
        let text = self.tera.render(WELCOME_TEXT, &ctx)?;

        Ok(RenderedEmail { html, text })
    }
}
