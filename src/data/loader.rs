use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::core::error::{GridError, Result};

/// Read a whole JSON document and deserialize it.
///
/// A missing file is reported as `FileNotFound`; a document that is not JSON
/// or does not have the expected shape as `DataFormat` naming the file.
pub fn load_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(GridError::FileNotFound(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| GridError::DataFormat(path.display().to_string(), e))
}
