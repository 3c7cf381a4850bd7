//! Application state management

use std::sync::Arc;

use crate::auth::AuthGate;
use crate::config::Config;
use crate::storage::FileStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    auth: AuthGate,
    store: Arc<dyn FileStore>,
    public_url: String,
}

impl AppState {
    /// Create a new application state
    ///
    /// `public_url` is the base URL phones should open, as advertised by the
    /// QR page.
    pub fn new(config: Config, store: Arc<dyn FileStore>, public_url: String) -> Self {
        let auth = AuthGate::new(config.auth.token.as_str());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                store,
                public_url,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the auth gate
    pub fn auth(&self) -> &AuthGate {
        &self.inner.auth
    }

    /// Get the file store
    pub fn store(&self) -> &dyn FileStore {
        self.inner.store.as_ref()
    }

    /// Get the externally reachable base URL
    pub fn public_url(&self) -> &str {
        &self.inner.public_url
    }
}
