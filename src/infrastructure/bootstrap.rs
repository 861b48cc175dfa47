//! Composition root for a reset run.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::vendor::VendorClient;
use crate::application::reset::{ResetExecutor, ResetService};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Build the reset service backed by the real vendor client.
///
/// # Errors
///
/// Returns an error if the token is missing or the HTTP client cannot be
/// constructed.
pub fn build_service(config: &Config) -> Result<ResetService> {
    let token = config.token()?;
    info!(token = %token, "Using vendor token");

    let client = Arc::new(VendorClient::new(&config.vendor, token.expose())?);
    let executor = ResetExecutor::new(client.clone())
        .with_request_delay(config.reset.request_delay())
        .with_max_concurrency(config.reset.max_concurrency);

    Ok(ResetService::new(client, executor).with_usage_threshold(config.reset.usage_threshold))
}
