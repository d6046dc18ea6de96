use super::entry::AdapterEntry;
use crate::error::DatasetError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read and parse a dataset file. Either every entry parses or nothing is returned.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<AdapterEntry>, DatasetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?;
    let entries = parse_dataset(&contents)?;
    info!(path = %path.display(), adapters = entries.len(), "Loaded dataset");
    Ok(entries)
}

pub fn parse_dataset(contents: &str) -> Result<Vec<AdapterEntry>, DatasetError> {
    Ok(serde_json::from_str(contents)?)
}
