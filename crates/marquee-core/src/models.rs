//! Domain models for the account service.

pub mod account;

pub use account::{Account, CreateAccount, OtpChallenge, PublicAccount, UpdateAccount};
