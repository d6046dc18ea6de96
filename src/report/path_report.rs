use crate::logic::graph::{PathSearchResult, PathStep, SwapPath, TokenGraph};
use crate::logic::pools::PoolNodeId;
use crate::logic::query::RouteQuery;
use crate::utils::{ParamMap, TokenLabel, sorted_map};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathsReport {
    pub token_in: TokenLabel,
    pub token_out: TokenLabel,
    pub max_depth: usize,
    pub k: usize,
    /// Shortest first, then in canonical order.
    pub paths: Vec<PathReport>,
    pub truncated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathReport {
    pub tokens: Vec<TokenLabel>,
    pub hops: usize,
    /// Each token with the pool that reached it.
    pub steps: Vec<PathStep>,
    /// Pools in order of first use.
    pub pools: Vec<PathPool>,
    /// Every token touched by the pools of this path, sorted.
    pub compatible_tokens: Vec<TokenLabel>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathPool {
    pub id: PoolNodeId,
    pub adapter: String,
    pub parameters: ParamMap,
}

impl PathReport {
    pub fn new(swap_path: &SwapPath, token_graph: &TokenGraph) -> Self {
        let mut compatible_tokens = BTreeSet::new();
        let mut pools = Vec::new();

        for pool_id in swap_path.unique_pools() {
            let Some(pool) = token_graph.get_pool(&pool_id) else {
                continue;
            };
            compatible_tokens.extend(pool.tokens.iter().cloned());
            pools.push(PathPool { id: pool_id, adapter: pool.adapter.clone(), parameters: sorted_map(&pool.parameters) });
        }

        Self {
            tokens: swap_path.tokens.clone(),
            hops: swap_path.hops(),
            steps: swap_path.steps(),
            pools,
            compatible_tokens: compatible_tokens.into_iter().collect(),
        }
    }
}

impl PathsReport {
    /// Paths are sorted by hop count, then tokens, then pools. Shortest stay first and
    /// equal-length paths no longer depend on the order edges were inserted.
    pub fn new(query: &RouteQuery, result: &PathSearchResult, token_graph: &TokenGraph) -> Self {
        let mut paths: Vec<PathReport> = result.paths.iter().map(|swap_path| PathReport::new(swap_path, token_graph)).collect();
        paths.sort_by_cached_key(|path| (path.hops, path.tokens.clone(), path.steps.iter().map(|step| step.via).collect::<Vec<_>>()));

        Self {
            token_in: query.token_in.clone(),
            token_out: query.token_out.clone(),
            max_depth: query.max_depth,
            k: query.k,
            paths,
            truncated: result.truncated,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Display for PathsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            writeln!(f, "No route from {} to {} within {} hops", self.token_in, self.token_out, self.max_depth)?;
        } else {
            writeln!(f, "{} paths from {} to {} within {} hops", self.paths.len(), self.token_in, self.token_out, self.max_depth)?;
        }

        for (i, path) in self.paths.iter().enumerate() {
            let route: String = path
                .steps
                .iter()
                .map(|step| match step.via {
                    Some(pool_id) => format!(" -[{}]-> {}", pool_id.short(), step.token),
                    None => step.token.to_string(),
                })
                .collect();
            writeln!(f, "\n#{} ({} hops) {}", i + 1, path.hops, route)?;
            for pool in &path.pools {
                writeln!(f, "  {} {} {}", pool.id.short(), pool.adapter, serde_json::Value::Object(pool.parameters.clone()))?;
            }
            let compatible = path.compatible_tokens.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
            writeln!(f, "  tokens: {compatible}")?;
        }

        if self.truncated {
            writeln!(f, "\n(search stopped at the expansion limit, result may be incomplete)")?;
        }
        Ok(())
    }
}
