use crate::dataset::{AdapterEntry, parse_dataset};
use crate::error::DatasetError;
use crate::logic::pools::{PoolNode, PoolNodeId, PoolNodeWrapper};
use crate::utils::TokenLabel;
use ahash::RandomState;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, info};

pub type FastHasher = RandomState;
/// FastHashMap using ahash
pub type FastHashMap<K, V> = HashMap<K, V, FastHasher>;

#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    // Directed multigraph: nodes are tokens, every pool-node adds one edge per ordered pair of
    // its distinct tokens. Parallel edges between the same pair are kept.
    // Outgoing edges are the forward adjacency, incoming edges the reverse adjacency.
    pub graph: DiGraph<TokenNode, PoolEdge, usize>,
    // pool id -> pool
    pub pools: HashMap<PoolNodeId, PoolNodeWrapper>,
    // token -> node index
    pub token_index: FastHashMap<TokenLabel, NodeIndex<usize>>,
}

impl TokenGraph {
    pub fn new() -> Self {
        Self { graph: DiGraph::default(), pools: HashMap::new(), token_index: FastHashMap::default() }
    }

    /// Build the graph from already parsed adapter entries.
    pub fn build(entries: &[AdapterEntry]) -> Self {
        let mut token_graph = TokenGraph::new();

        for entry in entries {
            for record in &entry.pools {
                let pool = PoolNode::from_record(&entry.adapter, entry.arguments.as_ref(), record);
                token_graph.add_pool(pool);
            }
        }

        info!(
            tokens = token_graph.token_count(),
            pools = token_graph.pool_count(),
            edges = token_graph.edge_count(),
            "Token graph built"
        );

        token_graph
    }

    /// Parse a JSON dataset and build the graph. A malformed dataset yields no graph at all.
    pub fn from_json_str(contents: &str) -> Result<Self, DatasetError> {
        let entries = parse_dataset(contents)?;
        Ok(Self::build(&entries))
    }

    pub fn add_or_get_token_idx(&mut self, token: &TokenLabel) -> NodeIndex<usize> {
        if let Some(&idx) = self.token_index.get(token) {
            return idx;
        }
        let idx = self.graph.add_node(TokenNode::new(token.clone()));
        self.token_index.insert(token.clone(), idx);
        idx
    }

    /// Add a pool-node and its edges. Returns false if a pool with the same id is already
    /// present. Of two colliding records the one with the smaller canonical
    /// (arguments, parameters) is kept, so the outcome does not depend on dataset order.
    /// Colliding records share adapter, identity and tokens, hence the same edges.
    pub fn add_pool<T: Into<PoolNodeWrapper>>(&mut self, pool: T) -> bool {
        let pool: PoolNodeWrapper = pool.into();
        let pool_id = pool.get_pool_id();

        if let Some(existing) = self.pools.get_mut(&pool_id) {
            if collision_key(&pool) < collision_key(existing) {
                debug!(%pool_id, replaced = ?existing.parameters, kept = ?pool.parameters, "Pool collides with existing pool node, keeping the canonical one");
                *existing = pool;
            } else {
                debug!(%pool_id, kept = ?existing.parameters, dropped = ?pool.parameters, "Pool collides with existing pool node, keeping the canonical one");
            }
            return false;
        }

        for token in &pool.tokens {
            self.add_or_get_token_idx(token);
        }

        let swap_directions = pool.get_swap_directions();
        if swap_directions.is_empty() {
            debug!(%pool, "Pool touches fewer than two tokens, no edges added");
        }

        for (from_token, to_token) in swap_directions {
            let node_from = self.add_or_get_token_idx(&from_token);
            let node_to = self.add_or_get_token_idx(&to_token);
            self.graph.add_edge(node_from, node_to, PoolEdge::new(pool_id));
        }

        self.pools.insert(pool_id, pool);
        true
    }

    pub fn contains_token(&self, token: &TokenLabel) -> bool {
        self.token_index.contains_key(token)
    }

    pub fn get_token_index(&self, token: &TokenLabel) -> Option<NodeIndex<usize>> {
        self.token_index.get(token).copied()
    }

    pub fn get_token(&self, idx: NodeIndex<usize>) -> Option<&TokenLabel> {
        self.graph.node_weight(idx).map(|node| &node.token)
    }

    pub fn get_pool(&self, pool_id: &PoolNodeId) -> Option<&PoolNodeWrapper> {
        self.pools.get(pool_id)
    }

    /// Forward adjacency: (destination, pool) for every edge leaving `idx`.
    pub fn outgoing(&self, idx: NodeIndex<usize>) -> impl Iterator<Item = (NodeIndex<usize>, PoolNodeId)> + '_ {
        self.graph.edges_directed(idx, Direction::Outgoing).map(|edge| (edge.target(), edge.weight().pool_id))
    }

    /// Reverse adjacency: (source, pool) for every edge entering `idx`.
    pub fn incoming(&self, idx: NodeIndex<usize>) -> impl Iterator<Item = (NodeIndex<usize>, PoolNodeId)> + '_ {
        self.graph.edges_directed(idx, Direction::Incoming).map(|edge| (edge.source(), edge.weight().pool_id))
    }

    /// All distinct tokens, sorted ascending.
    pub fn sorted_tokens(&self) -> Vec<TokenLabel> {
        let mut tokens: Vec<TokenLabel> = self.token_index.keys().cloned().collect();
        tokens.sort();
        tokens
    }

    pub fn token_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn collision_key(pool: &PoolNodeWrapper) -> (String, String) {
    (pool.arguments_key(), pool.parameters_key())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenNode {
    pub token: TokenLabel,
}

impl Display for TokenNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

impl TokenNode {
    pub fn new(token: TokenLabel) -> Self {
        Self { token }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolEdge {
    pub pool_id: PoolNodeId,
}

impl Display for PoolEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.pool_id)
    }
}

impl PoolEdge {
    pub fn new(pool_id: PoolNodeId) -> Self {
        Self { pool_id }
    }
}
