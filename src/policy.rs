//! Launch policies.
//!
//! A policy takes one string in and produces one string out; everything else
//! (session identity, serialization of structured payloads) is the caller's
//! job. The trait is the seam where an LLM-backed policy could be swapped in;
//! the two implementations here are deterministic rule engines.

use crate::deploy;
use crate::error::Error;
use crate::ipfs::IpfsClient;
use crate::launch::{LaunchStatus, Stage};
use crate::marketplace;
use crate::metrics::METRICS;
use crate::types::{Attribute, AttributeValue, CollectionDraft, NftMetadata};
use crate::validation::{sanitize_input, validate_collection_config, validate_metadata, ValidationReport};
use async_trait::async_trait;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

/// Response substituted when a policy fails; the HTTP layer pairs it with a
/// 500 and never retries.
pub const POLICY_FALLBACK_RESPONSE: &str =
    "I'm here to help you launch your NFT collection!";

/// One-shot conversational or workflow policy.
#[async_trait]
pub trait LaunchPolicy: Send + Sync {
    async fn respond(&self, input: &str) -> Result<String, Error>;
}

/// Conversational coordinator: answers questions about the launch process
/// and narrates what each stage involves.
pub struct CoordinatorPolicy;

#[async_trait]
impl LaunchPolicy for CoordinatorPolicy {
    async fn respond(&self, input: &str) -> Result<String, Error> {
        METRICS.policy_calls.fetch_add(1, Ordering::Relaxed);
        let message = sanitize_input(input);
        if message.is_empty() {
            return Err(Error::Policy("empty message after sanitization".to_string()));
        }
        Ok(coordinate(&message.to_lowercase()))
    }
}

fn coordinate(message: &str) -> String {
    if message.contains("deploy") || message.contains("blockchain") || message.contains("gas") {
        let rows: Vec<String> = crate::types::Blockchain::ALL
            .iter()
            .map(|chain| {
                let estimate = deploy::estimate_deployment_cost(chain.as_str());
                format!(
                    "- {}: ~{} ETH (${})",
                    chain.as_str(),
                    estimate.cost_in_eth,
                    estimate.cost_in_usd
                )
            })
            .collect();
        format!(
            "Deployment targets ERC721, ERC721A, or ERC1155 contracts. \
             Estimated deployment costs:\n{}\n\
             Tell me your collection name, symbol, and preferred chain and \
             I'll prepare the deployment.",
            rows.join("\n")
        )
    } else if message.contains("metadata") || message.contains("trait") || message.contains("attribute") {
        "Metadata needs a name (up to 100 characters), a description (up to \
         1000 characters), and an image pinned to IPFS. Traits are optional \
         trait_type/value pairs shown on marketplaces. Send your draft and \
         I'll validate it before pinning."
            .to_string()
    } else if message.contains("marketplace") || message.contains("list") || message.contains("opensea") {
        "Once your contract is deployed I can generate listing links for \
         OpenSea, Rarible, and LooksRare. Verification on each marketplace is \
         a manual step after listing."
            .to_string()
    } else if message.contains("status") || message.contains("progress") {
        "A launch moves through four stages: metadata, deployment, listing, \
         complete. Each stage finishes before the next begins, and any \
         adapter failure is recorded without losing progress."
            .to_string()
    } else {
        "I can help you launch an NFT collection end to end: metadata \
         generation and IPFS pinning, contract deployment, and marketplace \
         listings. What would you like to start with?"
            .to_string()
    }
}

/// Workflow policy: given a serialized collection config, drives the full
/// launch (metadata pin, deployment, listings) and reports a summary.
pub struct WorkflowPolicy {
    ipfs: IpfsClient,
}

impl WorkflowPolicy {
    pub fn new(ipfs: IpfsClient) -> Self {
        Self { ipfs }
    }

    async fn run(&self, config: &CollectionDraft) -> Result<String, Error> {
        let mut status = LaunchStatus::new();

        // --- Stage 1: metadata ---
        status.set_step("Generating metadata");
        let name = config.name.as_deref().unwrap_or_default();
        let description = config
            .description
            .clone()
            .unwrap_or_else(|| format!("{name} collection"));

        let cover = placeholder_cover(name);
        let image_uri = self
            .ipfs
            .pin_file(cover.into_bytes(), "cover.svg", "image/svg+xml")
            .await;
        status.set_progress(50).map_err(workflow_error)?;

        let metadata = NftMetadata {
            name: format!("{name} #1"),
            description,
            image: image_uri,
            attributes: vec![Attribute {
                trait_type: "Edition".to_string(),
                value: AttributeValue::Text("Genesis".to_string()),
            }],
            external_url: None,
            background_color: None,
            animation_url: None,
        };
        let report = validate_metadata(&to_draft(&metadata));
        if !report.valid {
            return Err(Error::Policy(format!(
                "generated metadata failed validation: {}",
                report.errors.join("; ")
            )));
        }

        let metadata_value = serde_json::to_value(&metadata)
            .map_err(|e| Error::Policy(format!("metadata serialization failed: {e}")))?;
        let metadata_uri = self.ipfs.pin_metadata(&metadata_value).await;
        status.set_metadata(metadata);
        status.set_progress(100).map_err(workflow_error)?;

        // --- Stage 2: deployment ---
        status.advance_to(Stage::Deployment).map_err(workflow_error)?;
        status.set_step("Deploying contract");
        let blockchain = config.blockchain.clone().unwrap_or_else(|| "ethereum".to_string());
        let deployment = deploy::deploy_contract(config, &blockchain);
        METRICS.deployments.fetch_add(1, Ordering::Relaxed);
        status.set_deployment(deployment.clone());
        status.set_progress(100).map_err(workflow_error)?;

        // --- Stage 3: listings ---
        status.advance_to(Stage::Listing).map_err(workflow_error)?;
        status.set_step("Creating marketplace listings");
        let listings =
            marketplace::listings_for_all(&deployment.contract_address, &blockchain);
        METRICS
            .listings
            .fetch_add(listings.len() as u64, Ordering::Relaxed);
        for listing in &listings {
            status.push_listing(listing.clone());
        }
        status.set_progress(100).map_err(workflow_error)?;

        // --- Stage 4: complete ---
        status.advance_to(Stage::Complete).map_err(workflow_error)?;
        status.set_step("Launch complete");
        status.set_progress(100).map_err(workflow_error)?;

        info!(
            collection = name,
            blockchain = %blockchain,
            address = %deployment.contract_address,
            "Launch workflow finished"
        );

        let listing_lines: Vec<String> = status
            .listings
            .iter()
            .map(|l| format!("- {}: {}", l.marketplace, l.collection_url))
            .collect();

        Ok(format!(
            "Launch complete for '{name}'.\n\
             Metadata: {metadata_uri}\n\
             Contract: {} on {} (tx {})\n\
             Gas used: {}, cost: {} ETH\n\
             Listings:\n{}",
            deployment.contract_address,
            blockchain,
            deployment.transaction_hash,
            deployment.gas_used,
            deployment.deployment_cost,
            listing_lines.join("\n"),
        ))
    }
}

#[async_trait]
impl LaunchPolicy for WorkflowPolicy {
    async fn respond(&self, input: &str) -> Result<String, Error> {
        METRICS.policy_calls.fetch_add(1, Ordering::Relaxed);
        let config: CollectionDraft = serde_json::from_str(input)
            .map_err(|e| Error::Policy(format!("invalid collection config: {e}")))?;

        let report = validate_collection_config(&config);
        if !report.valid {
            // User-correctable: report every problem in one pass instead of
            // failing the request.
            warn!(errors = report.errors.len(), "Collection config rejected");
            return Ok(rejection_summary(&report));
        }

        self.run(&config).await
    }
}

fn rejection_summary(report: &ValidationReport) -> String {
    format!(
        "The collection config is not deployable yet:\n{}",
        report
            .errors
            .iter()
            .map(|e| format!("- {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn workflow_error(e: crate::launch::LaunchError) -> Error {
    Error::Policy(format!("launch state error: {e}"))
}

/// Tiny inline SVG used as the collection cover when no artwork is supplied.
fn placeholder_cover(name: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"350\" height=\"350\">\
         <rect width=\"100%\" height=\"100%\" fill=\"#1a1a2e\"/>\
         <text x=\"50%\" y=\"50%\" fill=\"#e0e0e0\" text-anchor=\"middle\">{name}</text>\
         </svg>"
    )
}

/// Mirror a fully-formed metadata document back into a draft for validation.
fn to_draft(metadata: &NftMetadata) -> crate::types::MetadataDraft {
    crate::types::MetadataDraft {
        name: Some(metadata.name.clone()),
        description: Some(metadata.description.clone()),
        image: Some(metadata.image.clone()),
        attributes: Some(
            metadata
                .attributes
                .iter()
                .map(|a| crate::types::AttributeDraft {
                    trait_type: Some(a.trait_type.clone()),
                    value: Some(a.value.clone()),
                })
                .collect(),
        ),
        external_url: metadata.external_url.clone(),
        background_color: metadata.background_color.clone(),
        animation_url: metadata.animation_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn workflow() -> WorkflowPolicy {
        WorkflowPolicy::new(IpfsClient::new(&Config::default()).unwrap())
    }

    #[tokio::test]
    async fn test_coordinator_deploy_topic() {
        let response = CoordinatorPolicy
            .respond("How much does it cost to deploy on polygon?")
            .await
            .unwrap();
        assert!(response.contains("polygon"));
        assert!(response.contains("$0.80"));
    }

    #[tokio::test]
    async fn test_coordinator_default_greeting() {
        let response = CoordinatorPolicy.respond("hello there").await.unwrap();
        assert!(response.contains("launch an NFT collection"));
    }

    #[tokio::test]
    async fn test_coordinator_rejects_empty_input() {
        assert!(CoordinatorPolicy.respond("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_coordinator_sanitizes_input() {
        // Angle brackets are stripped before matching; still a valid message.
        let response = CoordinatorPolicy
            .respond("<script>metadata</script>")
            .await
            .unwrap();
        assert!(response.contains("Metadata needs a name"));
    }

    #[tokio::test]
    async fn test_workflow_rejects_malformed_json() {
        let err = workflow().respond("not json").await.unwrap_err();
        assert!(matches!(err, Error::Policy(_)));
    }

    #[tokio::test]
    async fn test_workflow_reports_validation_errors() {
        let response = workflow()
            .respond(r#"{"name":"","symbol":"X","totalSupply":0}"#)
            .await
            .unwrap();
        assert!(response.contains("not deployable"));
        assert!(response.contains("Collection name is required"));
        assert!(response.contains("Total supply must be at least 1"));
    }

    #[tokio::test]
    async fn test_workflow_full_run() {
        let input = r#"{"name":"Punks","symbol":"PNK","description":"A test collection",
                        "totalSupply":500,"royaltyPercentage":5.0,
                        "blockchain":"polygon","contractType":"ERC721"}"#;
        let response = workflow().respond(input).await.unwrap();
        assert!(response.contains("Launch complete for 'Punks'"));
        assert!(response.contains("ipfs://Qm"));
        assert!(response.contains("on polygon"));
        // Polygon OpenSea listings use the legacy matic slug.
        assert!(response.contains("https://opensea.io/assets/matic/0x"));
        assert!(response.contains("rarible"));
        assert!(response.contains("looksrare"));
    }

    #[tokio::test]
    async fn test_workflow_defaults_to_ethereum() {
        let input = r#"{"name":"Punks","symbol":"PNK","totalSupply":10}"#;
        let response = workflow().respond(input).await.unwrap();
        assert!(response.contains("on ethereum"));
    }
}
