// Three-Layer Architecture
pub mod dataset; // Data Layer: dataset model and loading
pub mod logic; // Logic Layer: token graph, path enumeration, union search
pub mod report; // Presentation Layer: deterministic reports

// Common utilities and types
pub mod config;
pub mod error;
pub mod utils;

// Re-export key components from each layer
pub use config::RouteConfigSection;
pub use dataset::{AdapterEntry, PoolRecord, load_dataset, parse_dataset};
pub use error::{DatasetError, QuerySide, RouteError};
pub use logic::{
    PathSearchResult, PathStep, PoolNode, PoolNodeId, RouteFinder, RouteMode, RouteQuery, SearchLimits, SwapPath, TokenGraph,
    UnionResult, find_all_paths, find_reachable_union,
};
pub use report::{PathsReport, RouteReport, UnionReport};
pub use utils::{TokenLabel, normalize};
