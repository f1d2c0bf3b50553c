//! Mail provider configuration.

/// Configuration for the outbound mail provider.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Provider endpoint for the transactional send call.
    pub api_url: String,
    /// Provider API key. Empty disables real delivery.
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.brevo.com/v3/smtp/email".to_string(),
            api_key: String::new(),
            sender_email: "no-reply@localhost".to_string(),
            sender_name: None,
            timeout_secs: 10,
        }
    }
}

impl MailConfig {
    /// True when an API key and a sender address are both present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.sender_email.trim().is_empty()
    }
}
