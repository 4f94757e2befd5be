//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, CatalogError, CatalogFile, seed_catalog};
use crate::config::AdminConfig;
use crate::directory::AdminDirectory;
use crate::services::AuthError;

/// Errors that stop the admin from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to prepare admin directory: {0}")]
    Auth(#[from] AuthError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: Catalog,
    directory: AdminDirectory,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, catalog: Catalog, directory: AdminDirectory) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                directory,
            }),
        }
    }

    /// Build state from configuration: load the catalog file (or seed data)
    /// and create the bootstrap super admin.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if the catalog file is unreadable or invalid.
    pub async fn from_config(config: AdminConfig) -> Result<Self, StartupError> {
        let file = match &config.catalog_path {
            Some(path) => {
                info!(path = %path.display(), "Loading catalog file");
                CatalogFile::read(path)?
            }
            None => seed_catalog()?,
        };
        let catalog = Catalog::from_file(file)?;

        let directory = AdminDirectory::new()?;
        if let Some(bootstrap) = &config.bootstrap {
            directory.bootstrap(bootstrap).await;
        } else {
            tracing::warn!("No bootstrap admin configured; nobody can log in");
        }

        Ok(Self::new(config, catalog, directory))
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Product and category catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Admin user accounts.
    #[must_use]
    pub fn directory(&self) -> &AdminDirectory {
        &self.inner.directory
    }
}
