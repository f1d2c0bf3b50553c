//! Marquee Auth — credentials, session tokens and the account service.
//!
//! This crate provides:
//! - Password verification ([`password`])
//! - Stateless session tokens ([`token`])
//! - One-time passcode generation and checks ([`otp`])
//! - The [`AccountService`] orchestrating registration, login and the
//!   OTP flows over injected repository and mailer implementations

pub mod config;
pub mod error;
pub mod otp;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AccountService, LoginInput, LoginOutput, RegisterInput, RegisterOutput};
pub use token::{SessionClaims, ValidatedSession};
