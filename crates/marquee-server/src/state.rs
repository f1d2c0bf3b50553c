//! Shared application state.

use std::sync::Arc;

use marquee_auth::AccountService;
use marquee_core::mailer::Mailer;
use marquee_core::repository::AccountRepository;

use crate::config::ServerConfig;

/// State handed to every handler.
pub struct AppState<R: AccountRepository, M: Mailer> {
    pub service: Arc<AccountService<R, M>>,
    pub config: Arc<ServerConfig>,
}

// Manual impl: deriving would demand R: Clone and M: Clone, which the
// Arcs make unnecessary.
impl<R: AccountRepository, M: Mailer> Clone for AppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
        }
    }
}
