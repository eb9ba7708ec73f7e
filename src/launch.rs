//! Launch status state machine.
//!
//! Tracks a single launch through four ordered stages:
//! `metadata → deployment → listing → complete`. The model is passive
//! storage driven by the orchestrator; it enforces transition legality and
//! progress monotonicity but never retries or rolls back on its own.
//! Adapter failures accumulate in `errors` without touching the stage.

use crate::types::{DeploymentResult, MarketplaceListing, NftMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered launch stages. Forward-only, no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Metadata,
    Deployment,
    Listing,
    Complete,
}

impl Stage {
    /// The only stage legally reachable from this one.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Metadata => Some(Stage::Deployment),
            Stage::Deployment => Some(Stage::Listing),
            Stage::Listing => Some(Stage::Complete),
            Stage::Complete => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Metadata => "metadata",
            Stage::Deployment => "deployment",
            Stage::Listing => "listing",
            Stage::Complete => "complete",
        }
    }
}

/// Rejected state-machine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchError {
    /// Target stage is not the immediate successor of the current stage.
    IllegalTransition { from: Stage, to: Stage },
    /// Entering `deployment` without validated metadata.
    MetadataNotSet,
    /// Entering `listing` without a deployment result.
    DeploymentNotSet,
    /// Entering `complete` with no listings.
    NoListings,
    /// Progress may not regress within a stage.
    ProgressRegress { from: u8, to: u8 },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::IllegalTransition { from, to } => {
                write!(f, "illegal transition: {} -> {}", from.as_str(), to.as_str())
            }
            LaunchError::MetadataNotSet => {
                write!(f, "cannot enter deployment before metadata is set")
            }
            LaunchError::DeploymentNotSet => {
                write!(f, "cannot enter listing before a deployment exists")
            }
            LaunchError::NoListings => write!(f, "cannot complete with no listings"),
            LaunchError::ProgressRegress { from, to } => {
                write!(f, "progress may not regress ({from} -> {to})")
            }
        }
    }
}

impl std::error::Error for LaunchError {}

/// Mutable launch record, one per session. Created at session start and
/// superseded (not deleted) when a new session begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchStatus {
    pub stage: Stage,
    pub progress: u8,
    pub current_step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NftMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<DeploymentResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listings: Vec<MarketplaceListing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl LaunchStatus {
    pub fn new() -> Self {
        Self {
            stage: Stage::Metadata,
            progress: 0,
            current_step: "Generating metadata".to_string(),
            metadata: None,
            deployment: None,
            listings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Advance to the next stage. Only the immediate successor is legal, and
    /// each stage has an entry precondition fed by the matching adapter.
    /// Progress resets to 0 on a successful transition.
    pub fn advance_to(&mut self, to: Stage) -> Result<(), LaunchError> {
        if self.stage.next() != Some(to) {
            return Err(LaunchError::IllegalTransition {
                from: self.stage,
                to,
            });
        }
        match to {
            Stage::Deployment if self.metadata.is_none() => {
                return Err(LaunchError::MetadataNotSet)
            }
            Stage::Listing if self.deployment.is_none() => {
                return Err(LaunchError::DeploymentNotSet)
            }
            Stage::Complete if self.listings.is_empty() => return Err(LaunchError::NoListings),
            _ => {}
        }
        self.stage = to;
        self.progress = 0;
        Ok(())
    }

    /// Set display progress within the current stage. Monotonic, capped at 100.
    pub fn set_progress(&mut self, progress: u8) -> Result<(), LaunchError> {
        let progress = progress.min(100);
        if progress < self.progress {
            return Err(LaunchError::ProgressRegress {
                from: self.progress,
                to: progress,
            });
        }
        self.progress = progress;
        Ok(())
    }

    pub fn set_step(&mut self, step: impl Into<String>) {
        self.current_step = step.into();
    }

    pub fn set_metadata(&mut self, metadata: NftMetadata) {
        self.metadata = Some(metadata);
    }

    pub fn set_deployment(&mut self, deployment: DeploymentResult) {
        self.deployment = Some(deployment);
    }

    pub fn push_listing(&mut self, listing: MarketplaceListing) {
        self.listings.push(listing);
    }

    /// Append a failure message. Errors never force a stage rollback; the
    /// orchestrator decides whether to retry or advance.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

impl Default for LaunchStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeploymentResult, MarketplaceListing, NftMetadata};

    fn test_metadata() -> NftMetadata {
        NftMetadata {
            name: "Foo".into(),
            description: "Bar".into(),
            image: "ipfs://Qm123".into(),
            attributes: Vec::new(),
            external_url: None,
            background_color: None,
            animation_url: None,
        }
    }

    fn test_deployment() -> DeploymentResult {
        DeploymentResult {
            contract_address: "0xabc".into(),
            transaction_hash: "0xdef".into(),
            blockchain: "ethereum".into(),
            gas_used: "2500000".into(),
            deployment_cost: "0.05".into(),
        }
    }

    fn test_listing() -> MarketplaceListing {
        MarketplaceListing {
            marketplace: "opensea".into(),
            collection_url: "https://opensea.io/assets/ethereum/0xabc".into(),
            verified: false,
            floor_price: None,
        }
    }

    #[test]
    fn test_new_starts_at_metadata_zero() {
        let status = LaunchStatus::new();
        assert_eq!(status.stage, Stage::Metadata);
        assert_eq!(status.progress, 0);
        assert!(status.errors.is_empty());
    }

    #[test]
    fn test_full_forward_walk() {
        let mut status = LaunchStatus::new();
        status.set_metadata(test_metadata());
        status.advance_to(Stage::Deployment).unwrap();
        status.set_deployment(test_deployment());
        status.advance_to(Stage::Listing).unwrap();
        status.push_listing(test_listing());
        status.advance_to(Stage::Complete).unwrap();
        assert_eq!(status.stage, Stage::Complete);
    }

    #[test]
    fn test_skip_rejected() {
        let mut status = LaunchStatus::new();
        status.set_metadata(test_metadata());
        let err = status.advance_to(Stage::Listing).unwrap_err();
        assert_eq!(
            err,
            LaunchError::IllegalTransition {
                from: Stage::Metadata,
                to: Stage::Listing
            }
        );
    }

    #[test]
    fn test_backward_rejected() {
        let mut status = LaunchStatus::new();
        status.set_metadata(test_metadata());
        status.advance_to(Stage::Deployment).unwrap();
        assert!(status.advance_to(Stage::Metadata).is_err());
    }

    #[test]
    fn test_same_stage_rejected() {
        let mut status = LaunchStatus::new();
        assert!(status.advance_to(Stage::Metadata).is_err());
    }

    #[test]
    fn test_entry_preconditions() {
        let mut status = LaunchStatus::new();
        assert_eq!(
            status.advance_to(Stage::Deployment),
            Err(LaunchError::MetadataNotSet)
        );
        status.set_metadata(test_metadata());
        status.advance_to(Stage::Deployment).unwrap();
        assert_eq!(
            status.advance_to(Stage::Listing),
            Err(LaunchError::DeploymentNotSet)
        );
        status.set_deployment(test_deployment());
        status.advance_to(Stage::Listing).unwrap();
        assert_eq!(status.advance_to(Stage::Complete), Err(LaunchError::NoListings));
    }

    #[test]
    fn test_progress_monotonic_within_stage() {
        let mut status = LaunchStatus::new();
        status.set_progress(40).unwrap();
        status.set_progress(40).unwrap();
        assert_eq!(
            status.set_progress(30),
            Err(LaunchError::ProgressRegress { from: 40, to: 30 })
        );
        assert_eq!(status.progress, 40);
    }

    #[test]
    fn test_progress_clamped_and_reset_on_transition() {
        let mut status = LaunchStatus::new();
        status.set_progress(200).unwrap();
        assert_eq!(status.progress, 100);
        status.set_metadata(test_metadata());
        status.advance_to(Stage::Deployment).unwrap();
        assert_eq!(status.progress, 0);
    }

    #[test]
    fn test_errors_accumulate_without_rollback() {
        let mut status = LaunchStatus::new();
        status.set_metadata(test_metadata());
        status.advance_to(Stage::Deployment).unwrap();
        status.record_error("gas estimate unavailable");
        status.record_error("rpc timeout");
        assert_eq!(status.stage, Stage::Deployment);
        assert_eq!(status.errors.len(), 2);
    }

    #[test]
    fn test_stage_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Stage::Deployment).unwrap(), "\"deployment\"");
    }

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::Metadata < Stage::Deployment);
        assert!(Stage::Listing < Stage::Complete);
        assert_eq!(Stage::Complete.next(), None);
    }
}
