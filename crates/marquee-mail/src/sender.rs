//! HTTP mail transport.

use std::time::Duration;

use marquee_core::error::MarqueeResult;
use marquee_core::mailer::{Mailer, OutboundEmail};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::MailConfig;
use crate::error::MailError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: EmailAddress,
    to: Vec<EmailAddress>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_content: Option<String>,
}

/// Outbound mail sender.
///
/// Unconfigured instances log the envelope and report success, so OTP
/// flows behave identically with and without a provider account. The
/// message body is never logged.
#[derive(Clone)]
pub struct MailSender {
    config: MailConfig,
    http: reqwest::Client,
}

impl MailSender {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MailError::Client)?;

        Ok(Self { config, http })
    }
}

impl Mailer for MailSender {
    async fn send(&self, email: OutboundEmail) -> MarqueeResult<()> {
        if !self.config.is_configured() {
            info!(
                to = %email.to,
                subject = %email.subject,
                "Mail provider not configured; skipping delivery"
            );
            return Ok(());
        }

        let body = SendEmailBody {
            sender: EmailAddress {
                email: self.config.sender_email.clone(),
                name: self.config.sender_name.clone(),
            },
            to: vec![EmailAddress {
                email: email.to.clone(),
                name: email.to_name,
            }],
            subject: email.subject,
            html_content: email.html,
            text_content: email.text,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(MailError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %email.to, "Mail accepted by provider");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(MailError::Rejected { status, detail }.into())
    }
}
