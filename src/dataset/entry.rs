use crate::utils::{ParamMap, TokenLabel, normalize_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One adapter block of the dataset: an adapter name, the arguments shared by all of its
/// pools and the configured pool instances.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdapterEntry {
    pub adapter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ParamMap>,
    #[serde(default)]
    pub pools: Vec<PoolRecord>,
}

impl AdapterEntry {
    pub fn new(adapter: impl Into<String>) -> Self {
        Self { adapter: adapter.into(), arguments: None, pools: Vec::new() }
    }

    pub fn with_arguments(mut self, arguments: ParamMap) -> Self {
        self.arguments = Some(arguments);
        self
    }

    pub fn with_pool(mut self, pool: PoolRecord) -> Self {
        self.pools.push(pool);
        self
    }
}

/// A single pool instance as read from the dataset. Tokens are kept raw; invalid entries are
/// dropped during normalization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoolRecord {
    #[serde(default)]
    pub parameters: ParamMap,
    #[serde(default)]
    pub tokens: Vec<Value>,
}

impl PoolRecord {
    pub fn new<T: Into<Value>>(parameters: ParamMap, tokens: Vec<T>) -> Self {
        Self { parameters, tokens: tokens.into_iter().map(Into::into).collect() }
    }

    /// Normalized, de-duplicated tokens in first-seen order.
    pub fn normalized_tokens(&self) -> Vec<TokenLabel> {
        let mut tokens: Vec<TokenLabel> = Vec::with_capacity(self.tokens.len());
        for label in self.tokens.iter().filter_map(normalize_value) {
            if !tokens.contains(&label) {
                tokens.push(label);
            }
        }
        tokens
    }
}
