use super::search_limits::SearchLimits;
use super::swap_path::SwapPath;
use super::token_graph::TokenGraph;
use crate::logic::pools::PoolNodeId;
use crate::utils::UNLIMITED_PATHS;
use petgraph::graph::NodeIndex;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// State of the search for all paths between two nodes in the graph.
#[derive(Debug, Clone)]
struct PathState {
    nodes: Vec<NodeIndex<usize>>,
    pools: Vec<PoolNodeId>,
}

impl PathState {
    fn hops(&self) -> usize {
        self.pools.len()
    }

    fn to_swap_path(&self, token_graph: &TokenGraph) -> SwapPath {
        let tokens = self.nodes.iter().filter_map(|idx| token_graph.get_token(*idx).cloned()).collect();
        SwapPath::new(tokens, self.pools.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathSearchResult {
    /// Paths in discovery order, shortest first.
    pub paths: Vec<SwapPath>,
    /// Set when the search stopped on `SearchLimits` rather than finishing.
    pub truncated: bool,
}

/// Find up to `k` simple paths (`k = 0` for all of them) from `start_node` to `end_node`
/// with at most `max_depth` hops.
///
/// The search is breadth-first, so paths are found shortest first. A path that reaches
/// `end_node` is recorded and not extended, but its siblings already in the queue are still
/// explored; `end_node` can therefore be reached through several branches of different
/// lengths. Which of those count towards `k` is decided by queue order alone.
/// If `start_node == end_node` the zero-hop path is the only result.
pub fn find_all_paths(
    token_graph: &TokenGraph,
    start_node: NodeIndex<usize>,
    end_node: NodeIndex<usize>,
    k: usize,
    max_depth: usize,
    limits: SearchLimits,
) -> PathSearchResult {
    let mut result = PathSearchResult::default();
    let mut queue = VecDeque::new();

    // Initialize the search
    queue.push_back(PathState { nodes: vec![start_node], pools: vec![] });

    let mut searched_path_counter = 0;

    loop {
        if k != UNLIMITED_PATHS && result.paths.len() >= k {
            break;
        }
        let Some(state) = queue.pop_front() else {
            break;
        };

        if limits.exhausted(searched_path_counter) {
            warn!(searched_path_counter, queued = queue.len() + 1, found = result.paths.len(), "Path search stopped at expansion limit");
            result.truncated = true;
            break;
        }
        searched_path_counter += 1;

        if state.hops() > max_depth {
            continue;
        }

        let Some(&last) = state.nodes.last() else {
            continue;
        };

        // If we reached the target node, record the path and stop this branch
        if last == end_node {
            result.paths.push(state.to_swap_path(token_graph));
            continue;
        }

        // Every extension would exceed the hop budget
        if state.hops() == max_depth {
            continue;
        }

        for (to_node, pool_id) in token_graph.outgoing(last) {
            if state.nodes.contains(&to_node) {
                continue;
            }

            let mut next = state.clone();
            next.nodes.push(to_node);
            next.pools.push(pool_id);
            queue.push_back(next);
        }
    }

    debug!(searched_path_counter, found = result.paths.len(), truncated = result.truncated, "Path search finished");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::graph::test_utils::{graph_of, node, pool_id};
    use crate::utils::normalize;

    #[test]
    fn test_two_hop_path() {
        let token_graph = graph_of(&[("X", "PoolA", &["T1", "T2"]), ("Y", "PoolB", &["T2", "T3"])]);

        let result = find_all_paths(&token_graph, node(&token_graph, "T1"), node(&token_graph, "T3"), 0, 2, SearchLimits::unlimited());

        assert!(!result.truncated);
        assert_eq!(result.paths.len(), 1);
        assert_eq!(result.paths[0].tokens, vec![normalize("T1"), normalize("T2"), normalize("T3")]);
        assert_eq!(result.paths[0].pools, vec![pool_id(&token_graph, "PoolA"), pool_id(&token_graph, "PoolB")]);
    }

    #[test]
    fn test_not_connected_within_depth() {
        let token_graph = graph_of(&[("X", "PoolA", &["T1", "T2"]), ("Y", "PoolB", &["T2", "T3"])]);

        let result = find_all_paths(&token_graph, node(&token_graph, "T1"), node(&token_graph, "T3"), 0, 1, SearchLimits::unlimited());

        assert!(result.paths.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn test_not_connected_path() {
        let token_graph = graph_of(&[("X", "PoolA", &["T1", "T2"]), ("Y", "PoolB", &["T3", "T4"])]);

        let result = find_all_paths(&token_graph, node(&token_graph, "T1"), node(&token_graph, "T4"), 0, 5, SearchLimits::unlimited());

        assert!(result.paths.is_empty());
    }

    #[test]
    fn test_start_equals_goal() {
        let token_graph = graph_of(&[("X", "PoolA", &["T1", "T2"]), ("Y", "PoolB", &["T2", "T1"])]);
        let t1 = node(&token_graph, "T1");

        let result = find_all_paths(&token_graph, t1, t1, 0, 3, SearchLimits::unlimited());

        assert_eq!(result.paths, vec![SwapPath::new_start(normalize("T1"))]);
    }

    #[test]
    fn test_parallel_pools_and_longer_routes() {
        let token_graph = graph_of(&[
            ("X", "P1", &["A", "B"]),
            ("X", "P2", &["B", "C"]),
            ("Y", "P3", &["A", "C"]),
            ("Z", "P4", &["A", "C"]),
        ]);
        let (a, c) = (node(&token_graph, "A"), node(&token_graph, "C"));

        let result = find_all_paths(&token_graph, a, c, 0, 2, SearchLimits::unlimited());

        assert_eq!(result.paths.len(), 3);
        // breadth-first: both direct hops come before the two-hop route
        assert_eq!(result.paths[0].hops(), 1);
        assert_eq!(result.paths[1].hops(), 1);
        assert_eq!(result.paths[2].hops(), 2);
        assert_eq!(result.paths[2].pools, vec![pool_id(&token_graph, "P1"), pool_id(&token_graph, "P2")]);
    }

    #[test]
    fn test_k_caps_results_in_queue_order() {
        let token_graph = graph_of(&[
            ("X", "P1", &["A", "B"]),
            ("X", "P2", &["B", "C"]),
            ("Y", "P3", &["A", "C"]),
            ("Z", "P4", &["A", "C"]),
        ]);
        let (a, c) = (node(&token_graph, "A"), node(&token_graph, "C"));

        let result = find_all_paths(&token_graph, a, c, 2, 2, SearchLimits::unlimited());

        assert_eq!(result.paths.len(), 2);
        assert!(result.paths.iter().all(|path| path.hops() == 1));
        let mut pools: Vec<PoolNodeId> = result.paths.iter().map(|path| path.pools[0]).collect();
        pools.sort();
        let mut expected = vec![pool_id(&token_graph, "P3"), pool_id(&token_graph, "P4")];
        expected.sort();
        assert_eq!(pools, expected);

        let result = find_all_paths(&token_graph, a, c, 1, 2, SearchLimits::unlimited());
        assert_eq!(result.paths.len(), 1);
    }

    #[test]
    fn test_multi_token_pool_reused_across_hops() {
        let token_graph = graph_of(&[("Curve", "3pool", &["DAI", "USDC", "USDT"])]);
        let (dai, usdt) = (node(&token_graph, "DAI"), node(&token_graph, "USDT"));

        let result = find_all_paths(&token_graph, dai, usdt, 0, 3, SearchLimits::unlimited());

        // DAI -> USDT and DAI -> USDC -> USDT, both through the same pool
        assert_eq!(result.paths.len(), 2);
        assert_eq!(result.paths[1].unique_pools(), vec![pool_id(&token_graph, "3pool")]);
    }

    #[test]
    fn test_paths_are_simple_and_within_depth() {
        let token_graph = graph_of(&[
            ("X", "P1", &["A", "B", "C"]),
            ("X", "P2", &["B", "C", "D"]),
            ("Y", "P3", &["A", "D"]),
            ("Y", "P4", &["D", "E"]),
            ("Z", "P5", &["C", "E"]),
            ("Z", "P6", &["A", "E"]),
        ]);
        let (a, e) = (node(&token_graph, "A"), node(&token_graph, "E"));

        for max_depth in 0..5 {
            let result = find_all_paths(&token_graph, a, e, 0, max_depth, SearchLimits::unlimited());
            for path in &result.paths {
                assert!(path.is_simple(), "{path}");
                assert!(path.hops() <= max_depth, "{path}");
                assert_eq!(path.tokens.first(), Some(&normalize("A")));
                assert_eq!(path.tokens.last(), Some(&normalize("E")));
            }
            if max_depth == 0 {
                assert!(result.paths.is_empty());
            }
        }
    }

    #[test]
    fn test_expansion_limit_truncates() {
        let token_graph = graph_of(&[("X", "P1", &["A", "B"]), ("X", "P2", &["B", "C"])]);
        let (a, c) = (node(&token_graph, "A"), node(&token_graph, "C"));

        let result = find_all_paths(&token_graph, a, c, 0, 3, SearchLimits::with_max_expansions(1));

        assert!(result.truncated);
        assert!(result.paths.is_empty());
    }
}
