use crate::logic::{RouteMode, SearchLimits};
use crate::utils::config_loader::{LoadConfigError, RouteConfigLoader, load_from_file};
use crate::utils::{DEFAULT_MAX_DEPTH, UNLIMITED_PATHS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Deserialize, Debug)]
pub struct RouteConfigRoot {
    pub route: RouteConfigSection,
}

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteConfigSection {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub k: usize,
    pub mode: Option<RouteMode>,
    pub dataset: Option<PathBuf>,
    pub max_expansions: Option<usize>,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl RouteConfigSection {
    /// Apply command line values on top of the file values. `None` keeps the file value.
    pub fn override_with(&mut self, max_depth: Option<usize>, k: Option<usize>, mode: Option<RouteMode>, max_expansions: Option<usize>) {
        if let Some(max_depth) = max_depth {
            self.max_depth = max_depth;
        }
        if let Some(k) = k {
            self.k = k;
        }
        if mode.is_some() {
            self.mode = mode;
        }
        if max_expansions.is_some() {
            self.max_expansions = max_expansions;
        }
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits { max_expansions: self.max_expansions }
    }
}

impl Default for RouteConfigSection {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, k: UNLIMITED_PATHS, mode: None, dataset: None, max_expansions: None }
    }
}

impl RouteConfigLoader for RouteConfigSection {
    type SectionType = RouteConfigSection;

    fn load_section_from_file(file_name: impl AsRef<Path>) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouteConfigRoot = load_from_file(file_name)?;
        Ok(root.route)
    }
}
