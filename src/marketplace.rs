//! Marketplace listing-link synthesis. Pure functions, no network.

use crate::types::MarketplaceListing;

/// Marketplaces a collection is listed on by default.
pub const DEFAULT_MARKETPLACES: [&str; 3] = ["opensea", "rarible", "looksrare"];

/// Base collection URL for a (marketplace, blockchain) pair. `None` when the
/// marketplace does not index that chain.
fn base_url(marketplace: &str, blockchain: &str) -> Option<&'static str> {
    match (marketplace, blockchain) {
        ("opensea", "ethereum") => Some("https://opensea.io/assets/ethereum"),
        // OpenSea still keys Polygon collections under the legacy "matic" slug.
        ("opensea", "polygon") => Some("https://opensea.io/assets/matic"),
        ("opensea", "base") => Some("https://opensea.io/assets/base"),
        ("opensea", "arbitrum") => Some("https://opensea.io/assets/arbitrum"),
        ("rarible", "ethereum") => Some("https://rarible.com/collection/ethereum"),
        ("rarible", "polygon") => Some("https://rarible.com/collection/polygon"),
        ("looksrare", "ethereum") => Some("https://looksrare.org/collections"),
        _ => None,
    }
}

/// Synthesize a listing link for a deployed collection. Unknown
/// (marketplace, chain) pairs fall back to a generic OpenSea-style URL.
/// `verified` always starts false; verification is a manual marketplace step.
pub fn listing_for(
    contract_address: &str,
    blockchain: &str,
    marketplace: &str,
) -> MarketplaceListing {
    let collection_url = match base_url(marketplace, blockchain) {
        Some(base) => format!("{base}/{contract_address}"),
        None => format!("https://opensea.io/assets/{blockchain}/{contract_address}"),
    };

    MarketplaceListing {
        marketplace: marketplace.to_string(),
        collection_url,
        verified: false,
        floor_price: None,
    }
}

/// Listings across all default marketplaces, in declaration order.
pub fn listings_for_all(contract_address: &str, blockchain: &str) -> Vec<MarketplaceListing> {
    DEFAULT_MARKETPLACES
        .iter()
        .map(|marketplace| listing_for(contract_address, blockchain, marketplace))
        .collect()
}
