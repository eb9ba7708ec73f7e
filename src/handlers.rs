//! HTTP request handlers.

use crate::deploy;
use crate::marketplace;
use crate::metrics::METRICS;
use crate::middleware::RequestId;
use crate::response::{
    ChatResponse, DeployResponse, ErrorResponse, EstimateResponse, HealthResponse,
    LaunchResponse, ListingResponse, ListingsResponse, MetadataFetchResponse, MetadataResponse,
    UploadResponse,
};
use crate::state::AppState;
use axum::extract::{Extension, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{error, info, warn};

/// MIME types accepted by the upload endpoint.
const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    METRICS.request_errors.fetch_add(1, Ordering::Relaxed);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal_error(message: &str, details: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    METRICS.request_errors.fetch_add(1, Ordering::Relaxed);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::with_details(message, details.to_string())),
    )
}

fn session_id(provided: Option<&Value>, prefix: &str) -> String {
    provided
        .and_then(|s| s.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{prefix}-{}", now_ms()))
}

fn now_ms() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// `POST /agent` — conversational coordinator.
pub async fn agent_chat(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(req_id)): Extension<RequestId>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let Some(message) = body
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
    else {
        return bad_request("Message is required").into_response();
    };

    info!(req_id = %req_id, chars = message.len(), "Coordinator request");

    match state.coordinator.respond(message).await {
        Ok(response) => Json(ChatResponse {
            response: if response.is_empty() {
                crate::policy::POLICY_FALLBACK_RESPONSE.to_string()
            } else {
                response
            },
            session_id: session_id(body.get("sessionId"), "session"),
            action: body
                .get("action")
                .and_then(|a| a.as_str())
                .unwrap_or("chat")
                .to_string(),
        })
        .into_response(),
        Err(e) => {
            METRICS.policy_errors.fetch_add(1, Ordering::Relaxed);
            error!(req_id = %req_id, error = %e, "Coordinator policy failed");
            internal_error("Failed to process request", e).into_response()
        }
    }
}

/// `PUT /agent` — execute the full launch workflow.
pub async fn agent_launch(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(req_id)): Extension<RequestId>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let Some(collection_data) = body.get("collectionData").filter(|c| !c.is_null()) else {
        return bad_request("Collection data is required").into_response();
    };

    info!(req_id = %req_id, "Launch workflow request");

    match state.workflow.respond(&collection_data.to_string()).await {
        Ok(result) => Json(LaunchResponse {
            success: true,
            result: if result.is_empty() {
                "Launch workflow initiated".to_string()
            } else {
                result
            },
            session_id: session_id(body.get("sessionId"), "launch"),
        })
        .into_response(),
        Err(e) => {
            METRICS.policy_errors.fetch_add(1, Ordering::Relaxed);
            error!(req_id = %req_id, error = %e, "Launch workflow failed");
            internal_error("Failed to execute launch workflow", e).into_response()
        }
    }
}

/// `POST /deploy` — simulate a contract deployment.
pub async fn deploy_contract(
    State(state): State<Arc<AppState>>,
    Json(config): Json<crate::types::CollectionDraft>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let has = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
    if !has(&config.name) || !has(&config.symbol) || !has(&config.blockchain) {
        return bad_request("Name, symbol, and blockchain are required").into_response();
    }
    let blockchain = config.blockchain.clone().unwrap_or_default();

    let deployment = deploy::deploy_contract(&config, &blockchain);
    METRICS.deployments.fetch_add(1, Ordering::Relaxed);

    Json(DeployResponse {
        success: true,
        deployment,
        message: "Contract deployed successfully",
    })
    .into_response()
}

#[derive(Deserialize)]
pub struct EstimateQuery {
    blockchain: Option<String>,
}

/// `GET /deploy?blockchain=` — deployment cost estimate.
pub async fn deploy_estimate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EstimateQuery>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let blockchain = query
        .blockchain
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "ethereum".to_string());
    let estimate = deploy::estimate_deployment_cost(&blockchain);

    Json(EstimateResponse {
        success: true,
        blockchain,
        estimate,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingBody {
    contract_address: Option<String>,
    blockchain: Option<String>,
    marketplace: Option<String>,
}

/// `POST /marketplace` — create a single marketplace listing.
pub async fn marketplace_create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateListingBody>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    fn present(field: &Option<String>) -> Option<&str> {
        field.as_deref().filter(|s| !s.is_empty())
    }
    let (Some(address), Some(blockchain)) =
        (present(&body.contract_address), present(&body.blockchain))
    else {
        return bad_request("Contract address and blockchain are required").into_response();
    };

    let marketplace_name = body.marketplace.as_deref().unwrap_or("opensea");
    let listing = marketplace::listing_for(address, blockchain, marketplace_name);
    METRICS.listings.fetch_add(1, Ordering::Relaxed);

    Json(ListingResponse {
        success: true,
        listing,
        message: "Marketplace listing created",
    })
    .into_response()
}

#[derive(Deserialize)]
pub struct ListingsQuery {
    address: Option<String>,
    blockchain: Option<String>,
}

/// `GET /marketplace?address=&blockchain=` — listings for all marketplaces.
pub async fn marketplace_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingsQuery>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let Some(address) = query.address.filter(|a| !a.is_empty()) else {
        return bad_request("Contract address is required").into_response();
    };
    let blockchain = query
        .blockchain
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "ethereum".to_string());

    let listings = marketplace::listings_for_all(&address, &blockchain);
    METRICS
        .listings
        .fetch_add(listings.len() as u64, Ordering::Relaxed);

    Json(ListingsResponse {
        success: true,
        contract_address: address,
        blockchain,
        listings,
    })
    .into_response()
}

/// `POST /metadata` — pin metadata to IPFS.
pub async fn metadata_create(
    State(state): State<Arc<AppState>>,
    Json(metadata): Json<Value>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let has = |field: &str| {
        metadata
            .get(field)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.is_empty())
    };
    if !has("name") || !has("description") {
        return bad_request("Name and description are required").into_response();
    }

    let ipfs_uri = state.ipfs.pin_metadata(&metadata).await;
    info!(uri = %ipfs_uri, "Metadata pinned");

    Json(MetadataResponse {
        success: true,
        metadata,
        ipfs_uri,
        message: "Metadata uploaded successfully",
    })
    .into_response()
}

#[derive(Deserialize)]
pub struct MetadataQuery {
    uri: Option<String>,
}

/// `GET /metadata?uri=` — fetch metadata through the gateway.
pub async fn metadata_fetch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetadataQuery>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    let Some(uri) = query.uri else {
        return bad_request("URI parameter is required").into_response();
    };

    match state.ipfs.fetch_metadata(&uri).await {
        Ok(metadata) => Json(MetadataFetchResponse {
            success: true,
            metadata,
            uri,
        })
        .into_response(),
        Err(e) => {
            warn!(uri = %uri, error = %e, "Metadata fetch failed");
            METRICS.request_errors.fetch_add(1, Ordering::Relaxed);
            e.into_response()
        }
    }
}

/// `POST /upload` — pin an image file to IPFS.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests.fetch_add(1, Ordering::Relaxed);

    // Find the "file" field; ignore anything else in the form.
    let mut file: Option<(String, String, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let file_type = field.content_type().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        file = Some((file_name, file_type, bytes.to_vec()));
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read upload body");
                        return bad_request("Failed to read uploaded file").into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart body");
                return bad_request("Failed to read uploaded file").into_response();
            }
        }
    }

    let Some((file_name, file_type, bytes)) = file else {
        return bad_request("No file provided").into_response();
    };

    if !ALLOWED_IMAGE_TYPES.contains(&file_type.as_str()) {
        METRICS.uploads_rejected.fetch_add(1, Ordering::Relaxed);
        return bad_request("Invalid file type. Only images are allowed.").into_response();
    }

    if bytes.len() > state.config.max_upload_bytes {
        METRICS.uploads_rejected.fetch_add(1, Ordering::Relaxed);
        return bad_request("File too large. Maximum size is 10MB.").into_response();
    }

    let file_size = bytes.len();
    let ipfs_uri = state.ipfs.pin_file(bytes, &file_name, &file_type).await;
    info!(file = %file_name, size = file_size, uri = %ipfs_uri, "Image pinned");

    Json(UploadResponse {
        success: true,
        ipfs_uri,
        file_name,
        file_size,
        file_type,
        message: "Image uploaded successfully",
    })
    .into_response()
}

/// `GET /health` — liveness with basic counters.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        mode: state.config.mode.as_str(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

/// `GET /metrics` — Prometheus text exposition format.
pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        METRICS.render(),
    )
}
