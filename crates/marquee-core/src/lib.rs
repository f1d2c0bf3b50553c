//! Marquee Core — shared domain types for the account service.
//!
//! This crate defines:
//! - Domain models ([`models`])
//! - The repository trait the storage layer implements ([`repository`])
//! - The mailer trait the delivery layer implements ([`mailer`])
//! - Error types shared across crates ([`error`])
//!
//! It deliberately has no database or HTTP dependencies so that the
//! service layer can be tested against in-memory implementations.

pub mod error;
pub mod mailer;
pub mod models;
pub mod repository;

pub use error::{MarqueeError, MarqueeResult};
