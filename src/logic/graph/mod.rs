pub mod path_builder;
pub mod search_limits;
pub mod swap_path;
pub mod token_graph;
pub mod union_search;

pub use path_builder::{PathSearchResult, find_all_paths};
pub use search_limits::SearchLimits;
pub use swap_path::{PathStep, SwapPath};
pub use token_graph::{FastHashMap, PoolEdge, TokenGraph, TokenNode};
pub use union_search::{UnionResult, distances_to, find_reachable_union};

#[cfg(test)]
pub(crate) mod test_utils {
    use super::TokenGraph;
    use crate::dataset::{AdapterEntry, PoolRecord};
    use crate::logic::pools::PoolNodeId;
    use crate::utils::{ParamMap, normalize};
    use petgraph::graph::NodeIndex;
    use serde_json::json;

    pub fn pool_params(pool: &str) -> ParamMap {
        let mut parameters = ParamMap::new();
        parameters.insert("pool".to_string(), json!(pool));
        parameters
    }

    /// (adapter, pool identity, tokens), one adapter entry per pool.
    pub fn entries_of(pools: &[(&str, &str, &[&str])]) -> Vec<AdapterEntry> {
        pools
            .iter()
            .map(|(adapter, pool, tokens)| AdapterEntry::new(*adapter).with_pool(PoolRecord::new(pool_params(pool), tokens.to_vec())))
            .collect()
    }

    pub fn graph_of(pools: &[(&str, &str, &[&str])]) -> TokenGraph {
        TokenGraph::build(&entries_of(pools))
    }

    pub fn node(token_graph: &TokenGraph, token: &str) -> NodeIndex<usize> {
        token_graph.get_token_index(&normalize(token)).unwrap()
    }

    /// Id of the pool whose `pool` parameter is `pool`.
    pub fn pool_id(token_graph: &TokenGraph, pool: &str) -> PoolNodeId {
        token_graph
            .pools
            .values()
            .find(|p| p.parameters.get("pool") == Some(&json!(pool)))
            .map(|p| p.get_pool_id())
            .unwrap()
    }
}
