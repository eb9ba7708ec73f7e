//! IPFS pinning adapter.
//!
//! In live mode, pins go to a Pinata-compatible API with explicit connect and
//! request timeouts. In simulated mode (or when a live pin fails) the adapter
//! degrades to a locally generated pseudo-hash so the workflow keeps moving;
//! the degradation is logged and counted but the returned URI shape is the
//! same either way.

use crate::config::{Config, LaunchMode};
use crate::error::Error;
use crate::metrics::METRICS;
use rand::Rng;
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{debug, warn};

const PIN_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const PIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GATEWAY_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Mock hashes mimic the base58 alphabet (no 0, O, I, l).
const MOCK_HASH_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const MOCK_HASH_LEN: usize = 46;

/// Client for the pinning API and the read gateway.
#[derive(Clone)]
pub struct IpfsClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    gateway: String,
    mode: LaunchMode,
}

impl IpfsClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(PIN_CONNECT_TIMEOUT)
            .timeout(PIN_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            http,
            api_url: config.pinning_api_url.trim_end_matches('/').to_string(),
            token: config.pinning_token.clone(),
            gateway: config.ipfs_gateway.clone(),
            mode: config.mode,
        })
    }

    /// Pin a metadata document. Infallible from the caller's view: a failed
    /// live pin degrades to a simulated hash, matching the error taxonomy
    /// (adapter failures degrade where a fallback is defined).
    pub async fn pin_metadata(&self, metadata: &Value) -> String {
        if self.mode == LaunchMode::Simulated {
            return mock_uri();
        }
        let name = metadata
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("metadata");
        match self.pin_json_live(metadata, &format!("{name}-metadata")).await {
            Ok(uri) => uri,
            Err(e) => {
                warn!(error = %e, "Metadata pin failed, falling back to simulated hash");
                METRICS.pin_fallbacks.fetch_add(1, Ordering::Relaxed);
                mock_uri()
            }
        }
    }

    /// Pin raw file bytes. Same degradation contract as `pin_metadata`.
    pub async fn pin_file(&self, bytes: Vec<u8>, file_name: &str, mime: &str) -> String {
        if self.mode == LaunchMode::Simulated {
            return mock_uri();
        }
        match self.pin_file_live(bytes, file_name, mime).await {
            Ok(uri) => uri,
            Err(e) => {
                warn!(error = %e, file = file_name, "File pin failed, falling back to simulated hash");
                METRICS.pin_fallbacks.fetch_add(1, Ordering::Relaxed);
                mock_uri()
            }
        }
    }

    async fn pin_json_live(&self, content: &Value, pin_name: &str) -> Result<String, Error> {
        let token = self.bearer_token()?;
        let body = serde_json::json!({
            "pinataContent": content,
            "pinataMetadata": { "name": pin_name },
        });

        let response = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", self.api_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Pinning(format!("pin request failed: {e}")))?;

        Self::extract_hash(response).await
    }

    async fn pin_file_live(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        mime: &str,
    ) -> Result<String, Error> {
        let token = self.bearer_token()?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| Error::Pinning(format!("invalid mime type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_url))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Pinning(format!("pin request failed: {e}")))?;

        Self::extract_hash(response).await
    }

    async fn extract_hash(response: reqwest::Response) -> Result<String, Error> {
        if !response.status().is_success() {
            return Err(Error::Pinning(format!(
                "pinning API returned {}",
                response.status()
            )));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Pinning(format!("invalid pin response: {e}")))?;
        let hash = body
            .get("IpfsHash")
            .and_then(|h| h.as_str())
            .ok_or_else(|| Error::Pinning("pin response missing IpfsHash".to_string()))?;
        debug!(hash, "Pinned to IPFS");
        METRICS.pins.fetch_add(1, Ordering::Relaxed);
        Ok(format!("ipfs://{hash}"))
    }

    fn bearer_token(&self) -> Result<&str, Error> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::Config("pinning token not configured".to_string()))
    }

    /// Fetch a metadata document through the HTTP gateway.
    pub async fn fetch_metadata(&self, uri: &str) -> Result<Value, Error> {
        let url = gateway_url(&self.gateway, uri);
        let response = self
            .http
            .get(&url)
            .timeout(GATEWAY_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Gateway(format!(
                "gateway returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("invalid metadata JSON: {e}")))
    }
}

/// Translate an `ipfs://` URI into a gateway URL. Plain HTTP URLs pass
/// through untouched.
pub fn gateway_url(gateway: &str, uri: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(path) => format!("{gateway}{path}"),
        None => uri.to_string(),
    }
}

/// Simulated pin URI: `ipfs://Qm` + 46 pseudo-base58 chars. Callers cannot
/// distinguish a simulated pin from a real one by URI shape alone.
fn mock_uri() -> String {
    let mut rng = rand::thread_rng();
    let mut hash = String::with_capacity(MOCK_HASH_LEN);
    for _ in 0..MOCK_HASH_LEN {
        let idx = rng.gen_range(0..MOCK_HASH_ALPHABET.len());
        hash.push(MOCK_HASH_ALPHABET[idx] as char);
    }
    format!("ipfs://Qm{hash}")
}
