use super::search_limits::SearchLimits;
use super::token_graph::{FastHashMap, TokenGraph};
use crate::logic::pools::PoolNodeId;
use crate::utils::TokenLabel;
use petgraph::graph::NodeIndex;
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, warn};

/// Every pool and token taking part in at least one simple route within the hop budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnionResult {
    pub pool_ids: BTreeSet<PoolNodeId>,
    /// Every token touched by a pool in `pool_ids`, not only the ones on a route.
    pub tokens: BTreeSet<TokenLabel>,
    pub truncated: bool,
}

impl UnionResult {
    pub fn is_empty(&self) -> bool {
        self.pool_ids.is_empty()
    }
}

/// Minimum hop count from every token that can reach `end_node` to `end_node`.
/// Tokens missing from the map cannot reach it at all.
pub fn distances_to(token_graph: &TokenGraph, end_node: NodeIndex<usize>) -> FastHashMap<NodeIndex<usize>, usize> {
    let mut distances = FastHashMap::default();
    let mut queue = VecDeque::new();

    distances.insert(end_node, 0);
    queue.push_back(end_node);

    while let Some(node) = queue.pop_front() {
        let distance = distances.get(&node).copied().unwrap_or_default();
        for (from_node, _) in token_graph.incoming(node) {
            if !distances.contains_key(&from_node) {
                distances.insert(from_node, distance + 1);
                queue.push_back(from_node);
            }
        }
    }

    distances
}

/// Union of all pools and tokens on any simple path from `start_node` to `end_node` with at
/// most `max_depth` hops, computed without materializing the paths.
///
/// Depth-first with backtracking. A branch is cut as soon as its depth plus the remaining
/// distance to `end_node` exceeds `max_depth`, which never removes a branch that could
/// still complete. The worst case is still exponential in the number of distinct simple
/// routes on dense graphs with a large `max_depth`; `limits` is the only hard bound.
pub fn find_reachable_union(
    token_graph: &TokenGraph,
    start_node: NodeIndex<usize>,
    end_node: NodeIndex<usize>,
    max_depth: usize,
    limits: SearchLimits,
) -> UnionResult {
    let distances = distances_to(token_graph, end_node);

    let mut search = UnionSearch {
        token_graph,
        end_node,
        max_depth,
        limits,
        distances,
        visited: vec![false; token_graph.graph.node_count()],
        // a simple path never has more hops than there are tokens
        branch_pools: Vec::with_capacity(max_depth.min(token_graph.token_count())),
        visits: 0,
        result: UnionResult::default(),
    };

    search.mark(start_node, true);
    search.visit(start_node, 0);

    debug!(
        visits = search.visits,
        pools = search.result.pool_ids.len(),
        tokens = search.result.tokens.len(),
        truncated = search.result.truncated,
        "Union search finished"
    );

    search.result
}

struct UnionSearch<'a> {
    token_graph: &'a TokenGraph,
    end_node: NodeIndex<usize>,
    max_depth: usize,
    limits: SearchLimits,
    distances: FastHashMap<NodeIndex<usize>, usize>,
    // tokens on the current branch
    visited: Vec<bool>,
    // pools used on the current branch, in order
    branch_pools: Vec<PoolNodeId>,
    visits: usize,
    result: UnionResult,
}

impl UnionSearch<'_> {
    fn mark(&mut self, node: NodeIndex<usize>, on_branch: bool) {
        if let Some(slot) = self.visited.get_mut(node.index()) {
            *slot = on_branch;
        }
    }

    fn is_on_branch(&self, node: NodeIndex<usize>) -> bool {
        self.visited.get(node.index()).copied().unwrap_or(false)
    }

    fn visit(&mut self, node: NodeIndex<usize>, depth: usize) {
        if self.result.truncated {
            return;
        }
        if self.limits.exhausted(self.visits) {
            warn!(visits = self.visits, pools = self.result.pool_ids.len(), "Union search stopped at expansion limit");
            self.result.truncated = true;
            return;
        }
        self.visits += 1;

        let Some(&distance) = self.distances.get(&node) else {
            return;
        };
        if depth > self.max_depth || depth + distance > self.max_depth {
            return;
        }

        if node == self.end_node {
            self.merge_branch();
            return;
        }

        let token_graph = self.token_graph;
        for (to_node, pool_id) in token_graph.outgoing(node) {
            if self.is_on_branch(to_node) {
                continue;
            }

            self.mark(to_node, true);
            self.branch_pools.push(pool_id);

            self.visit(to_node, depth + 1);

            self.branch_pools.pop();
            self.mark(to_node, false);
        }
    }

    fn merge_branch(&mut self) {
        for pool_id in &self.branch_pools {
            if !self.result.pool_ids.insert(*pool_id) {
                continue;
            }
            if let Some(pool) = self.token_graph.get_pool(pool_id) {
                self.result.tokens.extend(pool.tokens.iter().cloned());
            }
        }
    }
}
