//! Service metrics (lock-free atomics, rendered in Prometheus text format).

use std::sync::atomic::{AtomicU64, Ordering};

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub requests: AtomicU64,
    pub request_errors: AtomicU64,

    // --- Adapters ---
    pub pins: AtomicU64,
    pub pin_fallbacks: AtomicU64,
    pub deployments: AtomicU64,
    pub listings: AtomicU64,

    // --- Policy ---
    pub policy_calls: AtomicU64,
    pub policy_errors: AtomicU64,

    // --- Uploads ---
    pub uploads_rejected: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            requests: AtomicU64::new(0),
            request_errors: AtomicU64::new(0),
            pins: AtomicU64::new(0),
            pin_fallbacks: AtomicU64::new(0),
            deployments: AtomicU64::new(0),
            listings: AtomicU64::new(0),
            policy_calls: AtomicU64::new(0),
            policy_errors: AtomicU64::new(0),
            uploads_rejected: AtomicU64::new(0),
        }
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let requests = self.requests.load(Ordering::Relaxed);
        let request_errors = self.request_errors.load(Ordering::Relaxed);
        let pins = self.pins.load(Ordering::Relaxed);
        let pin_fallbacks = self.pin_fallbacks.load(Ordering::Relaxed);
        let deployments = self.deployments.load(Ordering::Relaxed);
        let listings = self.listings.load(Ordering::Relaxed);
        let policy_calls = self.policy_calls.load(Ordering::Relaxed);
        let policy_errors = self.policy_errors.load(Ordering::Relaxed);
        let uploads_rejected = self.uploads_rejected.load(Ordering::Relaxed);

        format!(
            "\
# HELP minilaunch_requests_total Total API requests received.\n\
# TYPE minilaunch_requests_total counter\n\
minilaunch_requests_total {requests}\n\
# HELP minilaunch_request_errors_total Requests answered with 4xx/5xx.\n\
# TYPE minilaunch_request_errors_total counter\n\
minilaunch_request_errors_total {request_errors}\n\
# HELP minilaunch_pins_total Successful live pins.\n\
# TYPE minilaunch_pins_total counter\n\
minilaunch_pins_total {pins}\n\
# HELP minilaunch_pin_fallbacks_total Live pins degraded to simulated hashes.\n\
# TYPE minilaunch_pin_fallbacks_total counter\n\
minilaunch_pin_fallbacks_total {pin_fallbacks}\n\
# HELP minilaunch_deployments_total Simulated contract deployments.\n\
# TYPE minilaunch_deployments_total counter\n\
minilaunch_deployments_total {deployments}\n\
# HELP minilaunch_listings_total Marketplace listings synthesized.\n\
# TYPE minilaunch_listings_total counter\n\
minilaunch_listings_total {listings}\n\
# HELP minilaunch_policy_calls_total Policy invocations.\n\
# TYPE minilaunch_policy_calls_total counter\n\
minilaunch_policy_calls_total {policy_calls}\n\
# HELP minilaunch_policy_errors_total Policy failures mapped to HTTP 500.\n\
# TYPE minilaunch_policy_errors_total counter\n\
minilaunch_policy_errors_total {policy_errors}\n\
# HELP minilaunch_uploads_rejected_total Uploads rejected for type or size.\n\
# TYPE minilaunch_uploads_rejected_total counter\n\
minilaunch_uploads_rejected_total {uploads_rejected}\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_all_series() {
        let rendered = METRICS.render();
        for series in [
            "minilaunch_requests_total",
            "minilaunch_pin_fallbacks_total",
            "minilaunch_deployments_total",
            "minilaunch_policy_errors_total",
            "minilaunch_uploads_rejected_total",
        ] {
            assert!(rendered.contains(series), "missing {series}");
        }
    }
}
