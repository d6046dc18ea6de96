use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::LazyLock;
use std::{env, fs};
use thiserror::Error;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}").expect("env var pattern is valid"));

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Error loading config: {0}")]
    ConfigError(String),
}

pub trait RouteConfigLoader {
    type SectionType;

    fn load_section_from_file(file_name: impl AsRef<Path>) -> Result<Self::SectionType, LoadConfigError>;
}

pub fn load_from_file<T: DeserializeOwned>(file_name: impl AsRef<Path>) -> Result<T, LoadConfigError> {
    let contents = fs::read_to_string(file_name)?;
    load_from_str(&contents)
}

pub fn load_from_str<T: DeserializeOwned>(contents: &str) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = expand_vars(contents);
    let config: T = toml::from_str(&contents)?;
    Ok(config)
}

fn expand_vars(raw_config: &str) -> String {
    ENV_VAR_RE
        .replace_all(raw_config, |caps: &Captures| match env::var(&caps[1]) {
            Ok(val) => val,
            Err(_) => caps[0].to_string(),
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_vars_are_left_in_place() {
        assert_eq!(expand_vars("dataset = \"${ADAPTER_ROUTE_SURELY_UNSET_VAR}\""), "dataset = \"${ADAPTER_ROUTE_SURELY_UNSET_VAR}\"");
    }

    #[test]
    fn test_known_vars_are_expanded() {
        // PATH is set in every test environment
        let path = env::var("PATH").unwrap_or_default();
        assert_eq!(expand_vars("x = \"${PATH}\""), format!("x = \"{path}\""));
    }
}
