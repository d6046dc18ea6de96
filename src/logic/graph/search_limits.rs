use serde::{Deserialize, Serialize};

/// Optional hard cap on search work. Unset means the search is exhaustive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of queue pops (path enumeration) or visits (union search).
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self { max_expansions: Some(max_expansions) }
    }

    pub(crate) fn exhausted(&self, expansions: usize) -> bool {
        self.max_expansions.is_some_and(|max| expansions >= max)
    }
}
