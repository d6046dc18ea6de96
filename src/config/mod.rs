pub mod route_config;

pub use route_config::{RouteConfigRoot, RouteConfigSection};
