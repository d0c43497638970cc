//! HTTP server for the navidocs route table.
//!
//! This crate serves the route table as a JSON API using axum:
//! - `GET /api/pages/{path}?lang=xx` - title, head, data and view of a page
//! - `GET /api/navigation?lang=xx` - sidebar model
//!
//! # Quick Start
//!
//! ```ignore
//! use navidocs_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 8080,
//!         version: "1.0.0".to_owned(),
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
//! Browser ──HTTP──► axum server (navidocs-server)
//!                        │
//!                        └─► API routes ──► Site (route matching + page data)
//!                                              │
//!                                              └─► ContentSource (documents)
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use navidocs_content::{ContentSource, FsContentSource};
use navidocs_routes::{PageFactory, RouteMap, Site, SiteOptions, StaticComponents, navi_routes};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content source directory.
    pub source_dir: PathBuf,
    /// YAML route table (`None` serves the built-in Navi table).
    pub routes_file: Option<PathBuf>,
    /// Site name used in synthesized titles.
    pub site_name: String,
    /// Default language and translation fallback.
    pub base_language: String,
    /// Components handed to every document.
    pub components: BTreeMap<String, serde_json::Value>,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("content"),
            routes_file: None,
            site_name: "Navi".to_owned(),
            base_language: "en".to_owned(),
            components: BTreeMap::new(),
            verbose: false,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// Site options derived from this configuration.
    #[must_use]
    pub fn site_options(&self) -> SiteOptions {
        SiteOptions {
            base_language: self.base_language.clone(),
            site_name: self.site_name.clone(),
        }
    }
}

/// Build the site served by `config`.
///
/// Documents are read from `source_dir`. The route table comes from
/// `routes_file` when set, otherwise the built-in Navi table is used.
///
/// # Errors
///
/// Returns an error if the route table file can't be read or is invalid.
pub fn build_site(config: &ServerConfig) -> Result<Site, ServerError> {
    let source: Arc<dyn ContentSource> = Arc::new(FsContentSource::new(config.source_dir.clone()));
    let factory = PageFactory::new(source, config.site_options());
    load_routes(&factory, config.routes_file.as_deref()).map(Site::new)
}

fn load_routes(factory: &PageFactory, routes_file: Option<&Path>) -> Result<RouteMap, ServerError> {
    let Some(path) = routes_file else {
        return Ok(navi_routes(factory)?);
    };
    tracing::debug!(path = %path.display(), "Loading route table");
    let text = std::fs::read_to_string(path)?;
    Ok(RouteMap::from_yaml(&text, factory)?)
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the site can't be built or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let site = Arc::new(build_site(&config)?);

    let state = Arc::new(AppState {
        site,
        components: Arc::new(StaticComponents(config.components.clone())),
        verbose: config.verbose,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from navidocs config.
#[must_use]
pub fn server_config_from_config(
    config: &navidocs_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        routes_file: config.content_resolved.routes_file.clone(),
        site_name: config.site.name.clone(),
        base_language: config.site.base_language.clone(),
        components: config.components.clone(),
        verbose,
        version,
    }
}
