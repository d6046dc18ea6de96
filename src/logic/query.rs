use super::graph::SearchLimits;
use crate::error::{QuerySide, RouteError};
use crate::utils::{TokenLabel, UNLIMITED_PATHS, normalize};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// List individual simple paths
    Paths,
    /// Report every pool and token on any simple path
    Union,
}

impl RouteMode {
    /// Union answers "everything that can route", which is what an unlimited path listing asks for.
    pub fn default_for(k: usize) -> Self {
        if k == UNLIMITED_PATHS { RouteMode::Union } else { RouteMode::Paths }
    }
}

/// An immutable, fully resolved route query. Tokens are already normalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteQuery {
    pub token_in: TokenLabel,
    pub token_out: TokenLabel,
    /// Maximum number of paths, `0` for all. Ignored in union mode.
    pub k: usize,
    pub max_depth: usize,
    pub mode: RouteMode,
    pub limits: SearchLimits,
}

impl RouteQuery {
    pub fn new(token_in: &str, token_out: &str, k: usize, max_depth: usize, mode: Option<RouteMode>) -> Self {
        Self {
            token_in: normalize(token_in),
            token_out: normalize(token_out),
            k,
            max_depth,
            mode: mode.unwrap_or_else(|| RouteMode::default_for(k)),
            limits: SearchLimits::default(),
        }
    }

    /// Build a query from optional raw tokens, failing on a missing or blank one.
    pub fn try_new(token_in: Option<&str>, token_out: Option<&str>, k: usize, max_depth: usize, mode: Option<RouteMode>) -> Result<Self, RouteError> {
        let token_in = token_in.filter(|t| !t.trim().is_empty()).ok_or(RouteError::MissingToken(QuerySide::TokenIn))?;
        let token_out = token_out.filter(|t| !t.trim().is_empty()).ok_or(RouteError::MissingToken(QuerySide::TokenOut))?;
        Ok(Self::new(token_in, token_out, k, max_depth, mode))
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}
