use super::pool_id::PoolNodeId;
use crate::dataset::PoolRecord;
use crate::utils::{IDENTITY_PARAM_KEYS, ParamMap, TokenLabel, canonical_map, normalize};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One configured instance of an adapter. Connects every pair of its tokens in one hop.
#[derive(Clone, Debug, Serialize)]
pub struct PoolNode {
    pub id: PoolNodeId,
    pub adapter: String,
    /// Shared by every pool of the same adapter entry.
    pub arguments: Option<ParamMap>,
    pub parameters: ParamMap,
    pub tokens: Vec<TokenLabel>,
}

pub type PoolNodeWrapper = Arc<PoolNode>;

impl PoolNode {
    pub fn new(adapter: impl Into<String>, arguments: Option<ParamMap>, parameters: ParamMap, tokens: Vec<TokenLabel>) -> Self {
        let adapter = adapter.into();
        let identity = identity_of(&parameters);
        let id = PoolNodeId::derive(&adapter, &identity, &tokens);
        Self { id, adapter, arguments, parameters, tokens }
    }

    pub fn from_record(adapter: &str, arguments: Option<&ParamMap>, record: &PoolRecord) -> Self {
        Self::new(adapter, arguments.cloned(), record.parameters.clone(), record.normalized_tokens())
    }

    pub fn get_pool_id(&self) -> PoolNodeId {
        self.id
    }

    /// Every ordered pair of distinct tokens, the directions this pool can convert in.
    pub fn get_swap_directions(&self) -> Vec<(TokenLabel, TokenLabel)> {
        let mut directions = Vec::with_capacity(self.tokens.len() * self.tokens.len().saturating_sub(1));
        for from in &self.tokens {
            for to in &self.tokens {
                if from != to {
                    directions.push((from.clone(), to.clone()));
                }
            }
        }
        directions
    }

    pub fn arguments_key(&self) -> String {
        match &self.arguments {
            Some(arguments) if !arguments.is_empty() => canonical_map(arguments),
            _ => String::new(),
        }
    }

    pub fn parameters_key(&self) -> String {
        canonical_map(&self.parameters)
    }
}

impl Hash for PoolNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for PoolNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PoolNode {}

impl Display for PoolNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]({})", self.adapter, self.id.short(), self.tokens.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(","))
    }
}

/// Best-effort on-chain identity of a pool record: the first identity key with a usable
/// value, else the whole parameter set.
pub fn identity_of(parameters: &ParamMap) -> String {
    for key in IDENTITY_PARAM_KEYS {
        match parameters.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return normalize(s).to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    canonical_map(parameters)
}
