//! Marquee Mail — outbound email over the provider's HTTP API.
//!
//! [`MailSender`] implements [`marquee_core::mailer::Mailer`]. When no
//! API key is configured it degrades to logging the envelope (never
//! the body), so local setups work without a provider account.

mod config;
mod error;
mod sender;
pub mod templates;

pub use config::MailConfig;
pub use error::MailError;
pub use sender::MailSender;
