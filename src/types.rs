//! Domain types for the launch workflow.
//!
//! Wire names follow the OpenSea metadata / marketplace conventions the rest
//! of the ecosystem expects (`trait_type`, `totalSupply`, `contractAddress`),
//! so serde renames are explicit wherever Rust naming differs.

use serde::{Deserialize, Serialize};

/// Supported deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blockchain {
    Ethereum,
    Polygon,
    Base,
    Arbitrum,
}

impl Blockchain {
    pub const ALL: [Blockchain; 4] = [
        Blockchain::Ethereum,
        Blockchain::Polygon,
        Blockchain::Base,
        Blockchain::Arbitrum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Blockchain::Ethereum => "ethereum",
            Blockchain::Polygon => "polygon",
            Blockchain::Base => "base",
            Blockchain::Arbitrum => "arbitrum",
        }
    }

    /// Parse a lowercase chain name. `None` for anything outside the set.
    pub fn parse(s: &str) -> Option<Blockchain> {
        match s {
            "ethereum" => Some(Blockchain::Ethereum),
            "polygon" => Some(Blockchain::Polygon),
            "base" => Some(Blockchain::Base),
            "arbitrum" => Some(Blockchain::Arbitrum),
            _ => None,
        }
    }
}

/// Supported contract standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    Erc1155,
    #[serde(rename = "ERC721A")]
    Erc721A,
}

impl ContractType {
    pub fn parse(s: &str) -> Option<ContractType> {
        match s {
            "ERC721" => Some(ContractType::Erc721),
            "ERC1155" => Some(ContractType::Erc1155),
            "ERC721A" => Some(ContractType::Erc721A),
            _ => None,
        }
    }
}

/// A single trait entry on a token. Values may be strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

/// Marketplace-style attribute value: `"Blue"` or `42`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
}

impl AttributeValue {
    /// Whether the value counts as filled in. Mirrors the permissive wire
    /// format: empty strings and zero are treated as absent.
    pub fn is_present(&self) -> bool {
        match self {
            AttributeValue::Text(s) => !s.is_empty(),
            AttributeValue::Number(n) => *n != 0.0,
        }
    }
}

/// Fully-formed token metadata, ready to pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
}

/// Partially-filled metadata as submitted by a client. Every field is
/// optional so validation can report all problems in one pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub attributes: Option<Vec<AttributeDraft>>,
    pub external_url: Option<String>,
    pub background_color: Option<String>,
    pub animation_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeDraft {
    pub trait_type: Option<String>,
    pub value: Option<AttributeValue>,
}

/// Partially-filled collection configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDraft {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub total_supply: Option<i64>,
    pub royalty_percentage: Option<f64>,
    pub blockchain: Option<String>,
    pub contract_type: Option<String>,
}

/// Result of a contract deployment. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub contract_address: String,
    pub transaction_hash: String,
    pub blockchain: String,
    pub gas_used: String,
    pub deployment_cost: String,
}

/// A synthesized marketplace listing link.
///
/// `marketplace` stays a plain string: an unknown marketplace name still
/// produces a generic listing rather than a rejection, and the name is echoed
/// back as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListing {
    pub marketplace: String,
    pub collection_url: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_price: Option<String>,
}

/// Deployment cost estimate row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub gas_estimate: &'static str,
    pub cost_in_eth: &'static str,
    pub cost_in_usd: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blockchain_parse_roundtrip() {
        for chain in Blockchain::ALL {
            assert_eq!(Blockchain::parse(chain.as_str()), Some(chain));
        }
        assert_eq!(Blockchain::parse("solana"), None);
    }

    #[test]
    fn test_attribute_value_untagged() {
        let text: AttributeValue = serde_json::from_str("\"Blue\"").unwrap();
        assert_eq!(text, AttributeValue::Text("Blue".into()));
        let num: AttributeValue = serde_json::from_str("42").unwrap();
        assert_eq!(num, AttributeValue::Number(42.0));
    }

    #[test]
    fn test_attribute_value_presence() {
        assert!(AttributeValue::Text("Blue".into()).is_present());
        assert!(!AttributeValue::Text(String::new()).is_present());
        assert!(AttributeValue::Number(7.0).is_present());
        assert!(!AttributeValue::Number(0.0).is_present());
    }

    #[test]
    fn test_collection_draft_camel_case() {
        let draft: CollectionDraft = serde_json::from_str(
            r#"{"name":"Punks","symbol":"PNK","totalSupply":500,"royaltyPercentage":5.0}"#,
        )
        .unwrap();
        assert_eq!(draft.total_supply, Some(500));
        assert_eq!(draft.royalty_percentage, Some(5.0));
    }

    #[test]
    fn test_deployment_result_wire_names() {
        let result = DeploymentResult {
            contract_address: "0xabc".into(),
            transaction_hash: "0xdef".into(),
            blockchain: "ethereum".into(),
            gas_used: "2500000".into(),
            deployment_cost: "0.05".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("contractAddress").is_some());
        assert!(json.get("transactionHash").is_some());
        assert!(json.get("gasUsed").is_some());
    }
}
