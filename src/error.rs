use crate::utils::{LoadConfigError, TokenLabel};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// The dataset could not be read or does not have the expected shape. Fatal, no graph is built.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuerySide {
    TokenIn,
    TokenOut,
}

impl Display for QuerySide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QuerySide::TokenIn => f.write_str("tokenIn"),
            QuerySide::TokenOut => f.write_str("tokenOut"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Config(#[from] LoadConfigError),
    #[error("missing {0}")]
    MissingToken(QuerySide),
    #[error("{side} {token} not found in graph (use --list-tokens to see available tokens)")]
    TokenNotFound { side: QuerySide, token: TokenLabel },
}
