//! # MiniLaunch
//!
//! A thin workflow-and-validation service for NFT collection launches.
//! Guides a launch through four ordered stages (metadata, deployment,
//! listing, complete), validates user-supplied metadata and collection
//! configuration, pins metadata to IPFS (live or simulated), simulates
//! contract deployment, and synthesizes marketplace listing links.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin minilaunch
//! ```
//!
//! ## Endpoints
//! - `POST /agent` - Conversational launch coordinator
//! - `PUT /agent` - Full launch workflow from a collection config
//! - `POST /deploy` / `GET /deploy` - Simulated deployment and cost estimates
//! - `POST /marketplace` / `GET /marketplace` - Listing-link synthesis
//! - `POST /metadata` / `GET /metadata` - Pin and fetch metadata
//! - `POST /upload` - Pin an image file
//! - `GET /health`, `GET /metrics` - Operational endpoints

pub mod config;
pub mod deploy;
mod error;
mod handlers;
pub mod ipfs;
pub mod launch;
pub mod marketplace;
pub mod metrics;
mod middleware;
pub mod policy;
mod response;
mod router;
mod state;
pub mod types;
pub mod validation;

pub use config::{Config, LaunchMode};
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
