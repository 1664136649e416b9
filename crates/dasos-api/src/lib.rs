//! dasos-api: Clients for the academic analytics API and the university catalog.
//!
//! Every call re-fetches; there is no cache and no retry. Callers decide how a
//! failure degrades.

pub mod gateway;
pub mod http;
pub mod mock;
pub mod catalog;
pub mod search;

use std::sync::Arc;

use dasos_common::Result;
use dasos_config::Config;
use tracing::info;

pub use catalog::{CatalogOutcome, CatalogRequest, CatalogSource, UpmCatalogClient};
pub use gateway::{AcademicApi, QueryParams};
pub use http::HttpGateway;
pub use mock::MockGateway;
pub use search::search_subjects;

/// Build the gateway selected by `api.use_mock_data`.
pub fn build_gateway(config: &Config) -> Result<Arc<dyn AcademicApi>> {
    if config.api.use_mock_data {
        info!("Using mock API payloads");
        return Ok(Arc::new(MockGateway::new()?));
    }
    info!(base_url = %config.api.base_url, "Using remote academic API");
    Ok(Arc::new(HttpGateway::new(&config.api.base_url, config.api.timeout_secs)?))
}

pub fn build_catalog(config: &Config) -> Result<Arc<dyn CatalogSource>> {
    Ok(Arc::new(UpmCatalogClient::from_config(config)?))
}
