/// Data Layer - Dataset
///
/// Serde model of the pool dataset (adapter entries with their pool records) and the
/// loader that reads it from disk. Nothing here decides anything about routing.
pub mod entry;
pub mod loader;

pub use entry::{AdapterEntry, PoolRecord};
pub use loader::{load_dataset, parse_dataset};
