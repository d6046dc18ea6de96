pub mod pool_id;
pub mod pool_node;

pub use pool_id::PoolNodeId;
pub use pool_node::{PoolNode, PoolNodeWrapper, identity_of};
