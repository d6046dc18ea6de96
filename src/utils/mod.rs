pub mod canonical;
pub mod config_loader;
pub mod constants;
pub mod token;

pub use canonical::{ParamMap, canonical_json, canonical_map, sorted_map};
pub use config_loader::*;
pub use constants::*;
pub use token::{TokenLabel, normalize, normalize_value};
