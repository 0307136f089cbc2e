/// gitsheet Error Module
///
/// This module defines the error type shared by the cheatsheet's subsystems.
/// Most operations in gitsheet are total; errors only come from the edges:
/// the preference database, the configuration file and the terminal.
use thiserror::Error;

/// Error type for the gitsheet application.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Preference database errors from SQLite operations
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed TOML in a configuration file
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File system and terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Built-in dataset violates one of its invariants
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Key binding strings that cannot be parsed
    #[error("Key binding error: {0}")]
    Key(String),
}

/// Type alias for Result to use SheetError as the error type.
pub type Result<T> = std::result::Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let storage_err = SheetError::Storage(rusqlite::Error::ExecuteReturnedResults);
        assert!(storage_err.to_string().contains("Storage error"));

        let config_err = SheetError::Config("Invalid config".to_string());
        assert!(config_err.to_string().contains("Configuration error"));

        let key_err = SheetError::Key("ctrl+".to_string());
        assert_eq!(key_err.to_string(), "Key binding error: ctrl+");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sheet_err: SheetError = io_err.into();
        match sheet_err {
            SheetError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        let toml_err = toml::from_str::<toml::Value>("[ui\nbroken").unwrap_err();
        let sheet_err: SheetError = toml_err.into();
        match sheet_err {
            SheetError::Toml(_) => {}
            _ => panic!("Expected TOML error"),
        }
    }
}
