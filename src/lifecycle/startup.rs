//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the portal route table and router from validated config
//! - Install the router as the process-wide instance
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The router is built exactly once; later reads go through `router::global`

use std::sync::Arc;

use thiserror::Error;

use crate::config::PortalConfig;
use crate::routing::{router, NavigationError, Router, TableError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table rejected: {0}")]
    Table(#[from] TableError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Build the portal router for `config` without installing it.
pub fn build_router(config: &PortalConfig) -> Result<Router, StartupError> {
    Ok(Router::portal(config.router_options())?)
}

/// Build the portal router and install it as the global instance.
pub fn install_router(config: &PortalConfig) -> Result<Arc<Router>, StartupError> {
    let router = router::install(build_router(config)?)?;
    tracing::info!(
        base = %router.history().base(),
        hash_mode = router.history().is_hash(),
        "Router ready"
    );
    Ok(router)
}
