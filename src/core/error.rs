use std::fmt;

/// Error types for streetgrid operations
#[derive(Debug)]
pub enum GridError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// Input document that is not valid JSON or does not match the expected shape
    DataFormat(String, serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Configuration error
    Config(String),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Reference to something the loaded data does not contain
    InvalidData(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Io(err) => write!(f, "IO error: {err}"),
            GridError::Json(err) => write!(f, "JSON error: {err}"),
            GridError::DataFormat(path, err) => write!(f, "Invalid JSON in '{path}': {err}"),
            GridError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            GridError::Config(msg) => write!(f, "Configuration error: {msg}"),
            GridError::FileNotFound(path) => write!(f, "File not found: {path}"),
            GridError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            GridError::InvalidData(msg) => write!(f, "Invalid data: {msg}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Io(err) => Some(err),
            GridError::Json(err) => Some(err),
            GridError::DataFormat(_, err) => Some(err),
            GridError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::Io(err)
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Json(err)
    }
}

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        GridError::TomlParsing(err)
    }
}

/// Type alias for Results using GridError
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err()
    }

    fn toml_error() -> toml::de::Error {
        toml::from_str::<crate::config::Config>("power_kw = [").unwrap_err()
    }

    #[test]
    fn test_error_display() {
        let config_error = GridError::Config("Invalid power".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid power"
        );

        let file_error = GridError::FileNotFound("city_analysis.json".to_string());
        assert_eq!(
            format!("{file_error}"),
            "File not found: city_analysis.json"
        );
    }

    #[test]
    fn test_data_format_display_names_the_file() {
        let error = GridError::DataFormat("schedule.json".to_string(), json_error());
        let display = format!("{error}");
        assert!(display.starts_with("Invalid JSON in 'schedule.json': "));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let grid_error = GridError::from(io_error);

        match grid_error {
            GridError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let grid_error = GridError::from(json_error());
        assert!(matches!(grid_error, GridError::Json(_)));
        assert!(format!("{grid_error}").contains("JSON error:"));
    }

    #[test]
    fn test_error_from_toml() {
        let grid_error = GridError::from(toml_error());
        assert!(matches!(grid_error, GridError::TomlParsing(_)));
        assert!(grid_error.source().is_some());
        assert!(format!("{grid_error}").contains("TOML parsing error:"));
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            GridError::Config("test".to_string()),
            GridError::FileNotFound("test".to_string()),
            GridError::InvalidArgument("test".to_string()),
            GridError::InvalidData("test".to_string()),
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
            assert!(format!("{error}").contains(':'));
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let grid_error = GridError::Io(io_error);

        let source = grid_error.source();
        assert!(source.is_some());

        let source_display = format!("{}", source.unwrap());
        assert!(source_display.contains("file not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GridError>();
    }

    #[test]
    fn test_result_type_alias() {
        let success: Result<i32> = Ok(42);
        let error: Result<i32> = Err(GridError::Config("test".to_string()));

        assert!(success.is_ok());
        assert!(error.is_err());
    }
}
