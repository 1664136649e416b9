//! Shared application state for the web server.

use std::sync::Arc;

use dasos_api::{build_catalog, build_gateway, AcademicApi, CatalogSource};
use dasos_config::Config;

use crate::views::Views;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub api: Arc<dyn AcademicApi>,
    pub catalog: Arc<dyn CatalogSource>,
    pub config: Config,
    pub views: Views,
}

impl AppState {
    pub fn new(
        config: Config,
        api: Arc<dyn AcademicApi>,
        catalog: Arc<dyn CatalogSource>,
    ) -> anyhow::Result<Self> {
        let views = Views::new()?;
        Ok(Self { api, catalog, config, views })
    }

    /// Gateway and catalog as selected by the configuration.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let api = build_gateway(&config)?;
        let catalog = build_catalog(&config)?;
        Self::new(config, api, catalog)
    }
}

pub type SharedState = Arc<AppState>;
