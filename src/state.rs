//! Application state shared across handlers.

use crate::config::Config;
use crate::ipfs::IpfsClient;
use crate::policy::{CoordinatorPolicy, LaunchPolicy, WorkflowPolicy};
use std::sync::atomic::AtomicU64;
use std::time::Instant;
use tracing::info;

/// Shared application state. The service is stateless between requests;
/// everything here is configuration, adapters, or counters.
pub struct AppState {
    pub config: Config,
    pub ipfs: IpfsClient,
    pub coordinator: Box<dyn LaunchPolicy>,
    pub workflow: Box<dyn LaunchPolicy>,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        config.validate()?;

        let ipfs = IpfsClient::new(&config)?;
        info!(mode = config.mode.as_str(), "Adapters initialized");

        Ok(Self {
            coordinator: Box::new(CoordinatorPolicy),
            workflow: Box::new(WorkflowPolicy::new(ipfs.clone())),
            ipfs,
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }
}
