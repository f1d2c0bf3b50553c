//! Outbound mail seam.
//!
//! OTP flows depend on this trait so they can run against a recording
//! double in tests and against the HTTP provider in production.

use crate::error::MarqueeResult;

/// A single outbound message.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
}

/// Mail delivery operations.
pub trait Mailer: Send + Sync {
    fn send(&self, email: OutboundEmail) -> impl Future<Output = MarqueeResult<()>> + Send;
}
