use std::fs;

use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::time::{timeout, Duration};

use crate::config::Config;

// A delivery that hangs past this is counted as failed.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP transport plus sender identity, built once at startup and shared
/// through the application state.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer").field("from", &self.from).finish()
    }
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let from: Mailbox = config.from_email.parse()?;

        Ok(Mailer { transport, from })
    }

    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        template_path: &str,
        placeholders: &[(String, String)],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if to_email.is_empty() {
            return Err("Email recipient cannot be empty".into());
        }
        if !to_email.contains('@') {
            return Err(format!("Invalid email address: {}", to_email).into());
        }

        let html_template = match fs::read_to_string(template_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to read email template {}: {}", template_path, e);
                return Err(format!("Template not found: {}", template_path).into());
            }
        };

        let html_body = render_template(&html_template, placeholders);

        let email = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::alternative().singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body),
                ),
            )?;

        match timeout(DELIVERY_TIMEOUT, self.transport.send(email)).await {
            Ok(Ok(_)) => {
                tracing::info!("✓ Email sent successfully to {}", to_email);
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!("✗ Email failed for {}: {}", to_email, e);
                Err(e.into())
            }
            Err(_) => {
                tracing::warn!(
                    "✗ Email delivery to {} timed out after {:?}",
                    to_email,
                    DELIVERY_TIMEOUT
                );
                Err("email delivery timed out".into())
            }
        }
    }
}

pub fn render_template(html_template: &str, placeholders: &[(String, String)]) -> String {
    let mut rendered = html_template.to_string();
    for (key, value) in placeholders {
        rendered = rendered.replace(key, value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_all_placeholders() {
        let template = "<p>Hi {{name}}, your code is {{code}}.</p>";
        let placeholders = vec![
            ("{{name}}".to_string(), "Ada".to_string()),
            ("{{code}}".to_string(), "AB12CD34".to_string()),
        ];
        let rendered = render_template(template, &placeholders);
        assert_eq!(rendered, "<p>Hi Ada, your code is AB12CD34.</p>");
    }

    #[test]
    fn render_leaves_unknown_placeholders_alone() {
        let template = "<p>{{name}} {{missing}}</p>";
        let placeholders = vec![("{{name}}".to_string(), "Ada".to_string())];
        assert_eq!(render_template(template, &placeholders), "<p>Ada {{missing}}</p>");
    }

    #[test]
    fn render_handles_repeated_placeholder() {
        let template = "{{code}} and again {{code}}";
        let placeholders = vec![("{{code}}".to_string(), "X1".to_string())];
        assert_eq!(render_template(template, &placeholders), "X1 and again X1");
    }
}
