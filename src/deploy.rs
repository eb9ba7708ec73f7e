//! Contract deployment adapter.
//!
//! Deployment is simulated: a random address and transaction hash with fixed
//! gas figures stand in for a real chain interaction. Cost estimates come
//! from a static per-chain table; RPC URLs are resolved from configuration
//! for the day a live deployment path lands.

use crate::config::Config;
use crate::types::{CollectionDraft, ContractType, CostEstimate, DeploymentResult};
use rand::Rng;
use tracing::info;

const SIMULATED_GAS_USED: &str = "2500000";
const SIMULATED_DEPLOYMENT_COST: &str = "0.05";

/// Deploy a collection contract. Simulated: always succeeds with a
/// placeholder address and hash.
pub fn deploy_contract(config: &CollectionDraft, blockchain: &str) -> DeploymentResult {
    let contract_address = random_hex(20, "0x");
    let transaction_hash = random_hex(32, "0x");

    info!(
        collection = config.name.as_deref().unwrap_or("unnamed"),
        blockchain,
        address = %contract_address,
        "Simulated contract deployment"
    );

    DeploymentResult {
        contract_address,
        transaction_hash,
        blockchain: blockchain.to_string(),
        gas_used: SIMULATED_GAS_USED.to_string(),
        deployment_cost: SIMULATED_DEPLOYMENT_COST.to_string(),
    }
}

/// Per-chain deployment cost estimate. Unknown chains fall back to the
/// ethereum row.
pub fn estimate_deployment_cost(blockchain: &str) -> CostEstimate {
    let (gas_estimate, cost_in_eth, cost_in_usd) = match blockchain {
        "polygon" => ("2500000", "0.01", "0.80"),
        "base" => ("2500000", "0.001", "3"),
        "arbitrum" => ("2500000", "0.002", "6"),
        _ => ("2500000", "0.05", "150"),
    };
    CostEstimate {
        gas_estimate,
        cost_in_eth,
        cost_in_usd,
    }
}

/// RPC endpoint for a chain. Env-overridable chains come from config;
/// unknown chains fall back to ethereum.
pub fn rpc_url(config: &Config, blockchain: &str) -> String {
    match blockchain {
        "polygon" => config.polygon_rpc_url.clone(),
        "base" => "https://mainnet.base.org".to_string(),
        "arbitrum" => "https://arb1.arbitrum.io/rpc".to_string(),
        _ => config.ethereum_rpc_url.clone(),
    }
}

/// Minimal ERC-721 ABI fragment used for both ERC721 and ERC721A.
pub const ERC721_MINIMAL_ABI: &[&str] = &[
    "constructor(string name, string symbol)",
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function totalSupply() view returns (uint256)",
    "function balanceOf(address owner) view returns (uint256)",
    "function ownerOf(uint256 tokenId) view returns (address)",
    "function tokenURI(uint256 tokenId) view returns (string)",
    "function mint(address to, string uri) returns (uint256)",
    "function safeMint(address to, string uri) returns (uint256)",
    "function transferFrom(address from, address to, uint256 tokenId)",
    "function safeTransferFrom(address from, address to, uint256 tokenId)",
    "function approve(address to, uint256 tokenId)",
    "function setApprovalForAll(address operator, bool approved)",
    "event Transfer(address indexed from, address indexed to, uint256 indexed tokenId)",
    "event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId)",
];

/// Minimal ERC-1155 ABI fragment.
pub const ERC1155_MINIMAL_ABI: &[&str] = &[
    "constructor(string uri)",
    "function uri(uint256 id) view returns (string)",
    "function balanceOf(address account, uint256 id) view returns (uint256)",
    "function balanceOfBatch(address[] accounts, uint256[] ids) view returns (uint256[])",
    "function mint(address to, uint256 id, uint256 amount, bytes data)",
    "function mintBatch(address to, uint256[] ids, uint256[] amounts, bytes data)",
    "function safeTransferFrom(address from, address to, uint256 id, uint256 amount, bytes data)",
    "function setApprovalForAll(address operator, bool approved)",
    "event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value)",
    "event ApprovalForAll(address indexed account, address indexed operator, bool approved)",
];

/// ABI fragment for a contract standard.
pub fn contract_abi(contract_type: ContractType) -> &'static [&'static str] {
    match contract_type {
        ContractType::Erc721 | ContractType::Erc721A => ERC721_MINIMAL_ABI,
        ContractType::Erc1155 => ERC1155_MINIMAL_ABI,
    }
}

/// Random lowercase hex string of `bytes` bytes with the given prefix.
fn random_hex(bytes: usize, prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(prefix.len() + bytes * 2);
    out.push_str(prefix);
    for _ in 0..bytes {
        let byte: u8 = rng.gen();
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
