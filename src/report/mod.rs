/// Presentation Layer - Reports
///
/// Turns search results into reports whose ordering is reproducible byte for byte.
/// Reports serialize with serde for machine consumers and implement `Display` for terminals.
pub mod path_report;
pub mod union_report;

pub use path_report::{PathPool, PathReport, PathsReport};
pub use union_report::{AdapterGroup, PoolEntry, UnionReport};

use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RouteReport {
    Paths(PathsReport),
    Union(UnionReport),
}

impl RouteReport {
    /// No route within the hop budget. A normal outcome, not an error.
    pub fn is_empty(&self) -> bool {
        match self {
            RouteReport::Paths(report) => report.is_empty(),
            RouteReport::Union(report) => report.is_empty(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        match self {
            RouteReport::Paths(report) => report.truncated,
            RouteReport::Union(report) => report.truncated,
        }
    }
}

impl Display for RouteReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteReport::Paths(report) => Display::fmt(report, f),
            RouteReport::Union(report) => Display::fmt(report, f),
        }
    }
}
