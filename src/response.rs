//! Response types for the launch API.

use crate::types::{CostEstimate, DeploymentResult, MarketplaceListing};
use serde::Serialize;
use serde_json::Value;

/// Response from the chat endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub action: String,
}

/// Response from the launch-workflow endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    pub success: bool,
    pub result: String,
    pub session_id: String,
}

/// Response from the deploy endpoint.
#[derive(Serialize)]
pub struct DeployResponse {
    pub success: bool,
    pub deployment: DeploymentResult,
    pub message: &'static str,
}

/// Response from the deploy-estimate endpoint.
#[derive(Serialize)]
pub struct EstimateResponse {
    pub success: bool,
    pub blockchain: String,
    pub estimate: CostEstimate,
}

/// Response from the create-listing endpoint.
#[derive(Serialize)]
pub struct ListingResponse {
    pub success: bool,
    pub listing: MarketplaceListing,
    pub message: &'static str,
}

/// Response from the all-listings endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsResponse {
    pub success: bool,
    pub contract_address: String,
    pub blockchain: String,
    pub listings: Vec<MarketplaceListing>,
}

/// Response from the metadata-pin endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub success: bool,
    pub metadata: Value,
    pub ipfs_uri: String,
    pub message: &'static str,
}

/// Response from the metadata-fetch endpoint.
#[derive(Serialize)]
pub struct MetadataFetchResponse {
    pub success: bool,
    pub metadata: Value,
    pub uri: String,
}

/// Response from the upload endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub ipfs_uri: String,
    pub file_name: String,
    pub file_size: usize,
    pub file_type: String,
    pub message: &'static str,
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: &'static str,
    pub uptime_secs: u64,
    pub requests: u64,
}

/// Shared error response shape: `{error, details?}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
