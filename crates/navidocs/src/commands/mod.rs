//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod routes;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use navidocs_config::{CliSettings, Config};
use navidocs_routes::Site;
use navidocs_server::{ServerConfig, build_site, server_config_from_config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use serve::ServeArgs;

/// Options locating the configuration, content and route table.
#[derive(Args, Debug, Default)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover navidocs.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// YAML route table (overrides config; default: built-in Navi table).
    #[arg(long)]
    pub(crate) routes: Option<PathBuf>,
}

impl SiteArgs {
    /// Load configuration with these overrides plus `settings`.
    pub(crate) fn load_config(self, settings: CliSettings) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            routes_file: self.routes,
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and build the site.
    pub(crate) fn load_site(self, version: &str, verbose: bool) -> Result<(Site, ServerConfig), CliError> {
        let config = self.load_config(CliSettings::default())?;
        let server_config = server_config_from_config(&config, version.to_owned(), verbose);
        let site = build_site(&server_config)?;
        Ok((site, server_config))
    }
}
