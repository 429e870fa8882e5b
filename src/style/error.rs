//! Style sheet errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::rc::RcError;

/// Errors from loading or activating style sheets.
#[derive(Debug, Error)]
pub enum StyleError {
    /// No style with this name is registered and it is not a style file.
    #[error("style '{name}' not found. Available: {}", .available.join(", "))]
    NotFound {
        name: String,
        available: Vec<String>,
    },

    /// The style sheet is not a flat `key: value` document.
    #[error("failed to parse style '{name}': {message}")]
    Parse { name: String, message: String },

    /// A parameter in the style sheet is unknown or has an invalid value.
    #[error("invalid parameter in style '{name}': {source}")]
    Rc {
        name: String,
        #[source]
        source: RcError,
    },

    /// The style file or directory could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StyleError {
    pub(crate) fn parse(name: impl Into<String>, message: impl Into<String>) -> Self {
        StyleError::Parse {
            name: name.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StyleError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_available() {
        let err = StyleError::NotFound {
            name: "dark".to_string(),
            available: vec!["dark_background".to_string(), "ggplot".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'dark'"));
        assert!(msg.contains("dark_background, ggplot"));
    }

    #[test]
    fn test_rc_error_is_source() {
        use std::error::Error as _;

        let err = StyleError::Rc {
            name: "mine".to_string(),
            source: RcError::UnknownKey {
                key: "lines.colour".to_string(),
            },
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("lines.colour"));
    }
}
