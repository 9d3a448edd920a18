//! Shared application state.

use domain_social::SocialService;

/// Cloned into every handler; the service only holds an `Arc` to the store.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub service: SocialService,
}
