use crate::utils::TokenLabel;
use alloy_primitives::hex;
use sha2::digest::Update;
use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Stable identifier of a pool-node: sha256 over adapter name, identity and token list.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PoolNodeId(pub [u8; 32]);

impl PoolNodeId {
    /// Hash the identifying fields, each prefixed with its length so that
    /// field boundaries can not shift between inputs.
    pub fn derive(adapter: &str, identity: &str, tokens: &[TokenLabel]) -> Self {
        let mut hasher = Sha256::new();
        update_field(&mut hasher, adapter.as_bytes());
        update_field(&mut hasher, identity.as_bytes());
        Update::update(&mut hasher, &(tokens.len() as u64).to_be_bytes());
        for token in tokens {
            update_field(&mut hasher, token.as_str().as_bytes());
        }

        let hash_slice: [u8; 32] = hasher.finalize().into();
        PoolNodeId(hash_slice)
    }

    /// First 4 bytes as hex, enough to tell pools apart in terminal output.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    Update::update(hasher, &(bytes.len() as u64).to_be_bytes());
    Update::update(hasher, bytes);
}

impl Display for PoolNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_prefixed(self.0))
    }
}

impl Debug for PoolNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PoolNodeId({})", hex::encode_prefixed(self.0))
    }
}

impl Serialize for PoolNodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode_prefixed(self.0))
    }
}

impl<'de> Deserialize<'de> for PoolNodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let hash: [u8; 32] = bytes.try_into().map_err(|_| serde::de::Error::custom("pool node id must be 32 bytes"))?;
        Ok(PoolNodeId(hash))
    }
}
