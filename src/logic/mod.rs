/// Logic Layer - Route Discovery
///
/// This layer is responsible for:
/// - Pool-node identity and pool-to-edge expansion
/// - The token multigraph
/// - Bounded simple-path enumeration (breadth-first)
/// - The pruned reachability union (depth-first, branch-and-bound)
///
/// Everything here runs synchronously on an immutable graph built once per dataset.
pub mod graph;
pub mod pools;
pub mod query;
pub mod route_finder;


// Re-export key components from the logic layer
pub use graph::{
    PathSearchResult, PathStep, SearchLimits, SwapPath, TokenGraph, UnionResult, distances_to, find_all_paths, find_reachable_union,
};
pub use pools::{PoolNode, PoolNodeId, PoolNodeWrapper};
pub use query::{RouteMode, RouteQuery};
pub use route_finder::RouteFinder;
