use super::graph::{PathSearchResult, TokenGraph, UnionResult, find_all_paths, find_reachable_union};
use super::query::{RouteMode, RouteQuery};
use crate::dataset::{AdapterEntry, load_dataset};
use crate::error::{QuerySide, RouteError};
use crate::report::{PathsReport, RouteReport, UnionReport};
use crate::utils::TokenLabel;
use petgraph::graph::NodeIndex;
use std::path::Path;
use tracing::info;

/// Answers route queries over one immutable token graph.
///
/// Every failure (bad dataset, unknown token) surfaces before a search starts; the search
/// itself always succeeds, possibly with an empty result.
#[derive(Debug, Clone, Default)]
pub struct RouteFinder {
    token_graph: TokenGraph,
}

impl RouteFinder {
    pub fn new(token_graph: TokenGraph) -> Self {
        Self { token_graph }
    }

    pub fn from_entries(entries: &[AdapterEntry]) -> Self {
        Self::new(TokenGraph::build(entries))
    }

    pub fn from_dataset_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let entries = load_dataset(path)?;
        Ok(Self::from_entries(&entries))
    }

    pub fn token_graph(&self) -> &TokenGraph {
        &self.token_graph
    }

    /// All distinct tokens of the graph, sorted.
    pub fn list_tokens(&self) -> Vec<TokenLabel> {
        self.token_graph.sorted_tokens()
    }

    /// Resolve both query tokens to graph nodes.
    pub fn validate(&self, query: &RouteQuery) -> Result<(NodeIndex<usize>, NodeIndex<usize>), RouteError> {
        let start_node = self.resolve(&query.token_in, QuerySide::TokenIn)?;
        let end_node = self.resolve(&query.token_out, QuerySide::TokenOut)?;
        Ok((start_node, end_node))
    }

    fn resolve(&self, token: &TokenLabel, side: QuerySide) -> Result<NodeIndex<usize>, RouteError> {
        if token.as_str().is_empty() {
            return Err(RouteError::MissingToken(side));
        }
        self.token_graph.get_token_index(token).ok_or_else(|| RouteError::TokenNotFound { side, token: token.clone() })
    }

    pub fn find_paths(&self, query: &RouteQuery) -> Result<PathSearchResult, RouteError> {
        let (start_node, end_node) = self.validate(query)?;
        let result = find_all_paths(&self.token_graph, start_node, end_node, query.k, query.max_depth, query.limits);
        info!(token_in = %query.token_in, token_out = %query.token_out, k = query.k, max_depth = query.max_depth, paths = result.paths.len(), "Path search done");
        Ok(result)
    }

    pub fn find_union(&self, query: &RouteQuery) -> Result<UnionResult, RouteError> {
        let (start_node, end_node) = self.validate(query)?;
        let result = find_reachable_union(&self.token_graph, start_node, end_node, query.max_depth, query.limits);
        info!(
            token_in = %query.token_in,
            token_out = %query.token_out,
            max_depth = query.max_depth,
            pools = result.pool_ids.len(),
            tokens = result.tokens.len(),
            "Union search done"
        );
        Ok(result)
    }

    /// Run the query in its mode and present the result.
    pub fn run(&self, query: &RouteQuery) -> Result<RouteReport, RouteError> {
        match query.mode {
            RouteMode::Paths => {
                let result = self.find_paths(query)?;
                Ok(RouteReport::Paths(PathsReport::new(query, &result, &self.token_graph)))
            }
            RouteMode::Union => {
                let result = self.find_union(query)?;
                Ok(RouteReport::Union(UnionReport::new(query, &result, &self.token_graph)))
            }
        }
    }
}
