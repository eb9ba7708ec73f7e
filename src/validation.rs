//! Pure validation for metadata and collection configuration.
//!
//! Validators accept partially-filled drafts and accumulate every violated
//! rule instead of failing fast, so a caller can surface all problems to the
//! user in one pass. Check order follows field declaration order; the order
//! of returned messages is part of the contract.

use crate::types::{CollectionDraft, ContractType, MetadataDraft};

/// Maximum accepted length for a sanitized input string.
const SANITIZED_MAX_CHARS: usize = 1000;
const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 1000;
const SYMBOL_MIN_CHARS: usize = 2;
const SYMBOL_MAX_CHARS: usize = 10;
const SUPPLY_MAX: i64 = 10_000;
const ROYALTY_MAX: f64 = 10.0;

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate token metadata.
pub fn validate_metadata(metadata: &MetadataDraft) -> ValidationReport {
    let mut errors = Vec::new();

    let name = metadata.name.as_deref().unwrap_or("");
    if name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if !name.is_empty() && name.chars().count() > NAME_MAX_CHARS {
        errors.push("Name must be less than 100 characters".to_string());
    }

    let description = metadata.description.as_deref().unwrap_or("");
    if description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push("Description must be less than 1000 characters".to_string());
    }

    match metadata.image.as_deref() {
        Some(image) if is_valid_ipfs_uri(image) => {}
        _ => errors.push("Valid image URI is required".to_string()),
    }

    if let Some(attributes) = &metadata.attributes {
        for (index, attr) in attributes.iter().enumerate() {
            let has_trait = attr
                .trait_type
                .as_deref()
                .is_some_and(|t| !t.is_empty());
            let has_value = attr.value.as_ref().is_some_and(|v| v.is_present());
            if !has_trait || !has_value {
                errors.push(format!(
                    "Attribute {} is missing trait_type or value",
                    index + 1
                ));
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate collection configuration.
pub fn validate_collection_config(config: &CollectionDraft) -> ValidationReport {
    let mut errors = Vec::new();

    let name = config.name.as_deref().unwrap_or("");
    if name.trim().is_empty() {
        errors.push("Collection name is required".to_string());
    }

    let symbol = config.symbol.as_deref().unwrap_or("");
    if symbol.trim().is_empty() {
        errors.push("Collection symbol is required".to_string());
    }
    if !symbol.is_empty() {
        let len = symbol.chars().count();
        if !(SYMBOL_MIN_CHARS..=SYMBOL_MAX_CHARS).contains(&len) {
            errors.push("Symbol must be between 2 and 10 characters".to_string());
        }
    }

    match config.total_supply {
        Some(supply) if supply >= 1 => {
            if supply > SUPPLY_MAX {
                errors.push("Total supply cannot exceed 10,000".to_string());
            }
        }
        _ => errors.push("Total supply must be at least 1".to_string()),
    }

    if let Some(royalty) = config.royalty_percentage {
        if !(0.0..=ROYALTY_MAX).contains(&royalty) {
            errors.push("Royalty percentage must be between 0 and 10".to_string());
        }
    }

    if let Some(blockchain) = config.blockchain.as_deref() {
        if crate::types::Blockchain::parse(blockchain).is_none() {
            errors.push("Invalid blockchain selection".to_string());
        }
    }

    if let Some(contract_type) = config.contract_type.as_deref() {
        if ContractType::parse(contract_type).is_none() {
            errors.push("Invalid contract type".to_string());
        }
    }

    ValidationReport::from_errors(errors)
}

/// An IPFS URI is the literal `ipfs://` prefix plus a non-empty path.
pub fn is_valid_ipfs_uri(uri: &str) -> bool {
    uri.starts_with("ipfs://") && uri.len() > 7
}

/// True iff `url` parses and carries an http or https scheme. Never panics.
pub fn is_valid_http_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Minimal input sanitizer: trim, strip angle brackets, cap at 1000 chars.
/// Not a full HTML sanitizer.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(SANITIZED_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttributeDraft, AttributeValue};

    fn valid_metadata() -> MetadataDraft {
        MetadataDraft {
            name: Some("Foo".into()),
            description: Some("Bar".into()),
            image: Some("ipfs://Qm123".into()),
            ..MetadataDraft::default()
        }
    }

    fn valid_config() -> CollectionDraft {
        CollectionDraft {
            name: Some("Punks".into()),
            symbol: Some("PNK".into()),
            total_supply: Some(500),
            royalty_percentage: Some(5.0),
            blockchain: Some("ethereum".into()),
            contract_type: Some("ERC721".into()),
            ..CollectionDraft::default()
        }
    }

    #[test]
    fn test_valid_metadata_passes() {
        let report = validate_metadata(&valid_metadata());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_name_reported() {
        let mut metadata = valid_metadata();
        metadata.name = None;
        let report = validate_metadata(&metadata);
        assert!(!report.valid);
        assert!(report.errors.contains(&"Name is required".to_string()));
    }

    #[test]
    fn test_whitespace_name_reported() {
        let mut metadata = valid_metadata();
        metadata.name = Some("   ".into());
        let report = validate_metadata(&metadata);
        assert!(report.errors.contains(&"Name is required".to_string()));
    }

    #[test]
    fn test_overlong_name_reported() {
        let mut metadata = valid_metadata();
        metadata.name = Some("x".repeat(101));
        let report = validate_metadata(&metadata);
        assert_eq!(
            report.errors,
            vec!["Name must be less than 100 characters".to_string()]
        );
    }

    #[test]
    fn test_overlong_description_reported() {
        let mut metadata = valid_metadata();
        metadata.description = Some("x".repeat(1001));
        let report = validate_metadata(&metadata);
        assert_eq!(
            report.errors,
            vec!["Description must be less than 1000 characters".to_string()]
        );
    }

    #[test]
    fn test_bad_image_uri_reported() {
        let mut metadata = valid_metadata();
        metadata.image = Some("https://example.com/foo.png".into());
        let report = validate_metadata(&metadata);
        assert_eq!(report.errors, vec!["Valid image URI is required".to_string()]);
    }

    #[test]
    fn test_errors_accumulate_in_declaration_order() {
        let report = validate_metadata(&MetadataDraft::default());
        assert_eq!(
            report.errors,
            vec![
                "Name is required".to_string(),
                "Description is required".to_string(),
                "Valid image URI is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_attribute_indices_are_one_based() {
        let mut metadata = valid_metadata();
        metadata.attributes = Some(vec![
            AttributeDraft {
                trait_type: Some("Background".into()),
                value: Some(AttributeValue::Text("Blue".into())),
            },
            AttributeDraft {
                trait_type: None,
                value: Some(AttributeValue::Text("Red".into())),
            },
            AttributeDraft {
                trait_type: Some("Rank".into()),
                value: Some(AttributeValue::Number(0.0)),
            },
        ]);
        let report = validate_metadata(&metadata);
        assert_eq!(
            report.errors,
            vec![
                "Attribute 2 is missing trait_type or value".to_string(),
                "Attribute 3 is missing trait_type or value".to_string(),
            ]
        );
    }

    #[test]
    fn test_valid_config_passes() {
        let report = validate_collection_config(&valid_config());
        assert!(report.valid);
    }

    #[test]
    fn test_symbol_length_bounds() {
        let mut config = valid_config();
        config.symbol = Some("A".into());
        let report = validate_collection_config(&config);
        assert!(report
            .errors
            .contains(&"Symbol must be between 2 and 10 characters".to_string()));

        config.symbol = Some("ABCDEFGHIJK".into());
        let report = validate_collection_config(&config);
        assert!(report
            .errors
            .contains(&"Symbol must be between 2 and 10 characters".to_string()));
    }

    #[test]
    fn test_supply_bounds() {
        let mut config = valid_config();
        for supply in [1, 10_000] {
            config.total_supply = Some(supply);
            let report = validate_collection_config(&config);
            assert!(report.valid, "supply {supply} should be valid");
        }

        config.total_supply = Some(0);
        let report = validate_collection_config(&config);
        assert!(report
            .errors
            .contains(&"Total supply must be at least 1".to_string()));

        config.total_supply = Some(10_001);
        let report = validate_collection_config(&config);
        assert!(report
            .errors
            .contains(&"Total supply cannot exceed 10,000".to_string()));
    }

    #[test]
    fn test_royalty_bounds() {
        let mut config = valid_config();
        config.royalty_percentage = Some(10.5);
        let report = validate_collection_config(&config);
        assert!(report
            .errors
            .contains(&"Royalty percentage must be between 0 and 10".to_string()));

        // Absent royalty is fine.
        config.royalty_percentage = None;
        assert!(validate_collection_config(&config).valid);
    }

    #[test]
    fn test_unknown_blockchain_and_contract_type() {
        let mut config = valid_config();
        config.blockchain = Some("solana".into());
        config.contract_type = Some("SPL".into());
        let report = validate_collection_config(&config);
        assert_eq!(
            report.errors,
            vec![
                "Invalid blockchain selection".to_string(),
                "Invalid contract type".to_string(),
            ]
        );
    }

    #[test]
    fn test_ipfs_uri_rules() {
        assert!(is_valid_ipfs_uri("ipfs://abc"));
        assert!(!is_valid_ipfs_uri("ipfs://"));
        assert!(!is_valid_ipfs_uri("http://abc"));
        assert!(!is_valid_ipfs_uri(""));
    }

    #[test]
    fn test_http_url_rules() {
        assert!(is_valid_http_url("https://opensea.io/assets"));
        assert!(is_valid_http_url("http://localhost:3000"));
        assert!(!is_valid_http_url("ftp://example.com"));
        assert!(!is_valid_http_url("not a url"));
    }

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        assert_eq!(sanitize_input("<b>hi</b>"), "bhi/b");
        assert_eq!(sanitize_input("  plain  "), "plain");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "a".repeat(5000);
        assert_eq!(sanitize_input(&long).chars().count(), 1000);
    }
}
