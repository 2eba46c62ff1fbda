//! Outbound mail seam.
//!
//! The forgot-password flow emits one message per issued token. Delivery is
//! fire-and-forget: the sender runs on its own task and a failure is logged,
//! never surfaced to the caller.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

const FORGOT_PASSWORD_TEMPLATE: &str = "FORGOT_PASSWORD";
const FORGOT_PASSWORD_SUBJECT: &str = "Forgot Password";

/// Template variables for the rendered mail.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailData {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct EmailBody {
    pub emails: Vec<String>,
    pub data: EmailData,
    pub subject: String,
}

/// Message handed to the mailer, template name plus rendering payload.
#[derive(Clone, Debug, Serialize)]
pub struct EmailPayload {
    pub template: String,
    pub payload: EmailBody,
}

impl EmailPayload {
    /// The forgot-password notification for one recipient.
    #[must_use]
    pub fn forgot_password(email: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            template: FORGOT_PASSWORD_TEMPLATE.to_string(),
            payload: EmailBody {
                emails: vec![email.to_string()],
                data: EmailData {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                },
                subject: FORGOT_PASSWORD_SUBJECT.to_string(),
            },
        }
    }
}

/// Mail transport. Implementations deliver to a broker, an SMTP relay, or a
/// log line, whatever the deployment wires in.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailPayload) -> anyhow::Result<()>;
}

/// Sender that only logs, for deployments without a mail transport.
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailPayload) -> anyhow::Result<()> {
        info!(
            template = %message.template,
            subject = %message.payload.subject,
            recipients = message.payload.emails.len(),
            "email send stub"
        );
        Ok(())
    }
}
