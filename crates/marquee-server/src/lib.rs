//! Marquee Server — HTTP surface for the account service.
//!
//! Routes live under `/api/auth` and `/api/user`; [`api::router`]
//! assembles the full application with CORS and request tracing.

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod extract;
pub mod state;
