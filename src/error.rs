//! Error types for Motivation Widget
//!
//! Errors are grouped by where they originate. None of them are fatal: the
//! controller logs them, shows them to the user where the user needs to act,
//! and keeps running.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type encompassing all error categories
#[derive(Error, Debug)]
pub enum AppError {
    /// State file errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Font import errors
    #[error(transparent)]
    Font(#[from] FontError),
}

/// State file errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error reading the state file
    #[error("Could not read state file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the state file
    #[error("Could not save state file: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be serialized
    #[error("Could not serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Font import errors
#[derive(Error, Debug)]
pub enum FontError {
    /// Font file could not be read
    #[error("Could not read font file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a usable font
    #[error("Not a valid font file: {path}")]
    Invalid { path: PathBuf },

    /// Font parsed but declares no family name
    #[error("Font has no family name: {path}")]
    NoFamily { path: PathBuf },
}

/// Geometry string errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// String does not match `WxH+X+Y`
    #[error("Invalid geometry: {0:?}")]
    Malformed(String),
}

/// Result type alias for state file operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for font operations
pub type FontResult<T> = Result<T, FontError>;

impl AppError {
    /// Message suitable for the status line or an error dialog
    pub fn user_message(&self) -> String {
        match self {
            AppError::Store(e) => e.user_message(),
            AppError::Font(e) => e.user_message(),
        }
    }
}

impl StoreError {
    /// Create a user-friendly error message suitable for the status line
    pub fn user_message(&self) -> String {
        match self {
            StoreError::WriteError { .. } => {
                "Could not save the widget state. Check disk space and permissions.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl FontError {
    /// Create a user-friendly error message suitable for display in dialogs
    pub fn user_message(&self) -> String {
        match self {
            FontError::ReadError { source, .. } => {
                format!("Could not load font:\n{}", source)
            }
            FontError::Invalid { path } | FontError::NoFamily { path } => {
                format!(
                    "Could not load font:\n{} is not a usable TrueType or OpenType font.",
                    path.display()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::ReadError {
            path: PathBuf::from("widget_state.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        };
        assert!(err.to_string().contains("widget_state.json"));
    }

    #[test]
    fn test_font_error_user_message() {
        let err = FontError::Invalid {
            path: PathBuf::from("/tmp/broken.ttf"),
        };
        let msg = err.user_message();
        assert!(msg.starts_with("Could not load font"));
        assert!(msg.contains("broken.ttf"));
    }

    #[test]
    fn test_app_error_from_font_error() {
        let err: AppError = FontError::NoFamily {
            path: PathBuf::from("x.ttf"),
        }
        .into();
        assert!(matches!(err, AppError::Font(_)));
        assert!(err.user_message().contains("x.ttf"));
    }

    #[test]
    fn test_write_error_message() {
        let err: AppError = StoreError::WriteError {
            path: PathBuf::from("widget_state.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(err.user_message().starts_with("Could not save"));
    }
}
