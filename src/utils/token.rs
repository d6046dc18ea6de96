use alloy_primitives::Address;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(0[xX])?[0-9a-fA-F]{40}$").expect("address pattern is valid"));

/// A normalized token identifier, the vertex key of the token graph.
///
/// Either an EIP-55 checksum-cased `0x` address or a trimmed opaque symbol such as `USDC`.
/// The only way to obtain one is through [`normalize`], so two labels compare equal
/// exactly when their raw inputs denote the same token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenLabel(String);

impl TokenLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_address(&self) -> bool {
        ADDRESS_RE.is_match(&self.0)
    }
}

impl Display for TokenLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TokenLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenLabel {
    fn from(raw: &str) -> Self {
        normalize(raw)
    }
}

impl From<String> for TokenLabel {
    fn from(raw: String) -> Self {
        normalize(&raw)
    }
}

impl<'de> Deserialize<'de> for TokenLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

/// Canonicalize a raw token identifier.
///
/// 40 hex digits (optionally `0x` prefixed, any case) become the checksum-cased address,
/// anything else is returned trimmed. Idempotent.
pub fn normalize(raw: &str) -> TokenLabel {
    let trimmed = raw.trim();
    if ADDRESS_RE.is_match(trimmed) {
        let hex = trimmed.get(trimmed.len() - 40..).unwrap_or(trimmed).to_ascii_lowercase();
        if let Ok(address) = Address::from_str(&hex) {
            return TokenLabel(address.to_checksum(None));
        }
    }
    TokenLabel(trimmed.to_string())
}

/// Normalize a dataset token entry, dropping anything that is not a non-empty string.
pub fn normalize_value(value: &serde_json::Value) -> Option<TokenLabel> {
    let raw = value.as_str()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(normalize(raw))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checksum_reference_vector() {
        let label = normalize("0x4c9edd5852cd905f086c759e8383e09bff1e68b3");
        assert_eq!(label.as_str(), "0x4c9EDD5852cd905f086C759E8383e09bff1E68B3");
        assert!(label.is_address());
    }

    #[test]
    fn test_checksum_eip55_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            assert_eq!(normalize(&expected.to_lowercase()).as_str(), expected);
            assert_eq!(normalize(&expected.to_uppercase().replacen("0X", "0x", 1)).as_str(), expected);
        }
    }

    #[test]
    fn test_address_without_prefix() {
        let label = normalize("  4c9edd5852cd905f086c759e8383e09bff1e68b3 ");
        assert_eq!(label.as_str(), "0x4c9EDD5852cd905f086C759E8383e09bff1E68B3");
    }

    #[test]
    fn test_symbol_is_trimmed_only() {
        assert_eq!(normalize("  USDC\t").as_str(), "USDC");
        assert_eq!(normalize("wstETH").as_str(), "wstETH");
        assert!(!normalize("USDC").is_address());
        // 39 hex digits is a symbol, not an address
        assert_eq!(normalize("0x4c9edd5852cd905f086c759e8383e09bff1e68b").as_str(), "0x4c9edd5852cd905f086c759e8383e09bff1e68b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["0x4c9edd5852cd905f086c759e8383e09bff1e68b3", "0X4C9EDD5852CD905F086C759E8383E09BFF1E68B3", " DAI ", "", "0xzz", "sDAI-USDC LP"] {
            let once = normalize(raw);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalize_value_drops_invalid_entries() {
        assert_eq!(normalize_value(&json!("USDC")), Some(normalize("USDC")));
        assert_eq!(normalize_value(&json!("")), None);
        assert_eq!(normalize_value(&json!("   ")), None);
        assert_eq!(normalize_value(&json!(null)), None);
        assert_eq!(normalize_value(&json!(42)), None);
        assert_eq!(normalize_value(&json!(false)), None);
    }

    #[test]
    fn test_deserialize_normalizes() -> eyre::Result<()> {
        let label: TokenLabel = serde_json::from_str("\"0x4c9edd5852cd905f086c759e8383e09bff1e68b3\"")?;
        assert_eq!(label.as_str(), "0x4c9EDD5852cd905f086C759E8383e09bff1E68B3");
        assert_eq!(serde_json::to_string(&label)?, "\"0x4c9EDD5852cd905f086C759E8383e09bff1E68B3\"");
        Ok(())
    }
}
