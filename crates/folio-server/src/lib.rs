//! HTTP server for the Folio printable-pages catalog.
//!
//! This crate provides an axum server answering:
//! - `GET /api/index` and `GET /api/page` with JSON view models
//! - `GET /sitemap.xml`, `/sitemap_categories.xml` and `/sitemap_pages.xml`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         data_dir: PathBuf::from("data"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (folio-server)
//!                        │
//!                        ├─► /api/* handlers ──► Site views (folio-site)
//!                        │
//!                        └─► sitemap handlers ──► Site sitemaps ──► quick-xml
//!                                                     │
//!                                                     └─► FsStorage (folio-storage)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_site::{Site, SiteOptions};
use folio_storage::{FsStorage, Storage};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Catalog data directory.
    pub data_dir: PathBuf,
    /// Site index filename inside `data_dir`.
    pub index_file: String,
    /// Category directory inside `data_dir`.
    pub categories_dir: String,
    /// View and sitemap options.
    pub site: SiteOptions,
    /// Application version, mixed into `ETag`s.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            data_dir: PathBuf::from("data"),
            index_file: "pages.json".to_owned(),
            categories_dir: "categories".to_owned(),
            site: SiteOptions::default(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_layout(
        config.data_dir.clone(),
        config.index_file.as_str(),
        config.categories_dir.as_str(),
    ));

    if !storage.exists(&folio_storage::ResourceKey::Index) {
        tracing::warn!(
            data_dir = %config.data_dir.display(),
            index_file = %config.index_file,
            "Site index not found, serving an empty catalog"
        );
    }

    let state = Arc::new(AppState {
        site: Site::new(storage, config.site.clone()),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, data_dir = %config.data_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.data_resolved.dir.clone(),
        index_file: config.data_resolved.index_file.clone(),
        categories_dir: config.data_resolved.categories_dir.clone(),
        site: site_options_from_config(config),
        version,
    }
}

/// Site options from the `[site]` section of a Folio config.
#[must_use]
pub fn site_options_from_config(config: &folio_config::Config) -> SiteOptions {
    SiteOptions {
        base_url: config.site.base_url.clone(),
        similar_limit: config.site.similar_limit,
        sitemap_page_size: config.site.sitemap_page_size,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_default_config() {
        let config = folio_config::Config::default();

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 7979);
        assert_eq!(server.index_file, "pages.json");
        assert_eq!(server.categories_dir, "categories");
        assert_eq!(server.site.similar_limit, 8);
        assert_eq!(server.site.sitemap_page_size, 40_000);
        assert_eq!(server.site.base_url, None);
        assert_eq!(server.version, "1.2.3");
    }
}
