//! JSON artifact files (schema, class labels, frequency tables).

use crate::error::{Result, SeverityError};
use serde::de::DeserializeOwned;
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path).map_err(|source| SeverityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|e| SeverityError::Artifact {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}
