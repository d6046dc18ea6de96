use crate::logic::pools::PoolNodeId;
use crate::utils::TokenLabel;
use serde::Serialize;
use std::fmt::Display;

/// One step of a path: the token reached and the pool used to reach it (none for the first step).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub token: TokenLabel,
    pub via: Option<PoolNodeId>,
}

/// A simple path through the token graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SwapPath {
    // The tokens of the path e.g. token0 -> token1 -> token2
    pub tokens: Vec<TokenLabel>,
    // The pools of the path e.g. pool0 -> pool1, always one less than tokens
    pub pools: Vec<PoolNodeId>,
}

impl Display for SwapPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SwapPath(tokens={:?}, pools={:?})",
            self.tokens.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
            self.pools.iter().map(|p| p.short()).collect::<Vec<_>>()
        )
    }
}

impl SwapPath {
    pub fn new(tokens: Vec<TokenLabel>, pools: Vec<PoolNodeId>) -> Self {
        SwapPath { tokens, pools }
    }

    /// The zero-hop path that only contains the start token.
    pub fn new_start(token: TokenLabel) -> Self {
        SwapPath { tokens: vec![token], pools: vec![] }
    }

    /// Number of hops, one per pool used.
    pub fn hops(&self) -> usize {
        self.pools.len()
    }

    pub fn steps(&self) -> Vec<PathStep> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, token)| PathStep { token: token.clone(), via: i.checked_sub(1).and_then(|p| self.pools.get(p).copied()) })
            .collect()
    }

    /// Pools in order of first use, without repeats.
    pub fn unique_pools(&self) -> Vec<PoolNodeId> {
        let mut unique = Vec::with_capacity(self.pools.len());
        for pool in &self.pools {
            if !unique.contains(pool) {
                unique.push(*pool);
            }
        }
        unique
    }

    /// No token appears twice.
    pub fn is_simple(&self) -> bool {
        self.tokens.iter().enumerate().all(|(i, token)| !self.tokens[..i].contains(token))
    }
}
