//! Application-wide services, built once at startup.
//!
//! Storage backend per platform:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorage`]
//! - **Desktop / Mobile** (native): one file per key under
//!   `<data_dir>/medical-appointments/` via [`store::FileStore`]

use std::sync::Arc;

use api::{ApiClient, ApiError, ClientConfig};
use session::{install_auth_bridge, Session, ThemeStore};
use store::KeyValueStore;
use tracing::info;

use crate::navigation::redirect_to_login;

/// Directory below the platform data dir that holds native storage.
pub const DATA_DIR_NAME: &str = "medical-appointments";

/// Durable storage for the current platform.
pub fn platform_storage() -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorage::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(DATA_DIR_NAME);
        Arc::new(store::FileStore::new(base))
    }
}

/// The API client, the session and the theme store, wired together.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: Session,
    pub theme: ThemeStore,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

impl AppContext {
    /// Restores session and theme from `storage` and installs the auth
    /// bridge. Build exactly one per client.
    pub fn bootstrap<F>(
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStore>,
        on_unauthorized: F,
    ) -> Result<Self, ApiError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let api = ApiClient::new(config)?;
        let session = Session::restore(api.clone(), storage.clone());
        let theme = ThemeStore::restore(storage);
        install_auth_bridge(&session, on_unauthorized)?;

        info!(
            api_base_url = %api.base_url(),
            authenticated = session.is_authenticated(),
            "Application context ready"
        );
        Ok(Self {
            api,
            session,
            theme,
        })
    }

    /// [`bootstrap`](Self::bootstrap) with platform storage, redirecting to
    /// `/login` on a rejected credential.
    pub fn for_platform(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::bootstrap(config, platform_storage(), redirect_to_login)
    }
}
